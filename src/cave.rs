use {
    crate::{
        grid::{Direction, Grid2D, GridParseError},
        search::DenseDijkstra,
    },
    derive_deref::Deref,
    glam::IVec2,
    std::{
        fmt::{Display, Formatter, Result as FmtResult, Write},
        ops::RangeInclusive,
    },
    strum::{EnumCount, IntoEnumIterator},
};

/// A single cell's risk level, 1 through 9. 0 is not a valid risk level.
#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy, Deref)]
#[repr(transparent)]
pub struct Risk(u8);

#[cfg_attr(test, derive(PartialEq))]
#[derive(Debug)]
pub struct InvalidRisk;

impl Risk {
    const MIN: u8 = 1_u8;
    const MAX: u8 = 9_u8;
    const ASCII_OFFSET: u8 = b'0';
    const ASCII_RANGE: RangeInclusive<char> = ((Self::MIN + Self::ASCII_OFFSET) as char)
        ..=((Self::MAX + Self::ASCII_OFFSET) as char);

    /// Adds `offset` to the risk level, cycling values greater than `MAX` back into
    /// `MIN..=MAX`. A risk of 9 offset by 1 becomes 1, never 10 or 0.
    fn offset(self, offset: u32) -> Self {
        let sum: u8 = self.0 + (offset % Self::MAX as u32) as u8;

        Self(if sum > Self::MAX {
            (sum - Self::MIN) % Self::MAX + Self::MIN
        } else {
            sum
        })
    }
}

impl Default for Risk {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<char> for Risk {
    type Error = InvalidRisk;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        // Range-check the `char` itself: a non-ASCII scalar value must not be truncated into
        // the digit range.
        Self::ASCII_RANGE
            .contains(&value)
            .then(|| Self(value as u8 - Self::ASCII_OFFSET))
            .ok_or(InvalidRisk)
    }
}

impl Display for Risk {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_char((self.0 + Self::ASCII_OFFSET) as char)
    }
}

/// The arena indices of a cell's orthogonally adjacent in-bounds cells: 2 for a corner cell, 3
/// for an edge cell, 4 for an interior cell. Fixed once the cave is wired.
#[cfg_attr(test, derive(Debug, PartialEq))]
#[derive(Clone, Copy, Default)]
struct NeighborList {
    cells: [u32; Direction::COUNT],
    len: u8,
}

impl NeighborList {
    fn push(&mut self, index: u32) {
        self.cells[self.len as usize] = index;
        self.len += 1_u8;
    }

    fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.cells[..self.len as usize]
            .iter()
            .map(|index: &u32| *index as usize)
    }
}

/// A grid of risk levels with pre-wired 4-directional adjacency. The start cell is the top-left
/// corner and the end cell is the bottom-right corner. Structure is immutable after
/// construction: solver state (tentative distances, visited flags) lives in the path finder,
/// not in the cave.
#[cfg_attr(test, derive(Debug, PartialEq))]
pub struct Cave {
    risks: Grid2D<Risk>,
    neighbors: Vec<NeighborList>,
}

impl Cave {
    fn from_risks(risks: Grid2D<Risk>) -> Self {
        let mut cave: Self = Self {
            neighbors: vec![NeighborList::default(); risks.area()],
            risks,
        };

        cave.wire_neighbors();

        cave
    }

    /// There is no wraparound: grid edges are real boundaries, including between tiles of an
    /// expanded cave.
    fn wire_neighbors(&mut self) {
        for pos in self.risks.iter_positions() {
            let index: usize = self.risks.index_from_pos(pos);

            for dir in Direction::iter() {
                if let Some(neighbor_index) = self.risks.try_index_from_pos(pos + dir.vec()) {
                    self.neighbors[index].push(neighbor_index as u32);
                }
            }
        }
    }

    #[inline]
    pub fn dimensions(&self) -> IVec2 {
        self.risks.dimensions()
    }

    #[inline]
    pub fn risks(&self) -> &Grid2D<Risk> {
        &self.risks
    }

    /// Replicates the base pattern across a `factor` x `factor` arrangement of tiles, where
    /// each tile's risks are the base risks offset by the tile's row index plus its column
    /// index (with the 1..=9 wraparound). A factor of 1 reproduces the base cave.
    pub fn expand(&self, factor: i32) -> Self {
        assert!(factor > 0_i32, "expansion factor must be positive");

        let dimensions: IVec2 = self.risks.dimensions();
        let mut risks: Grid2D<Risk> = Grid2D::default(factor * dimensions);

        for tile_y in 0_i32..factor {
            for tile_x in 0_i32..factor {
                let tile_pos: IVec2 = dimensions * IVec2::new(tile_x, tile_y);
                let risk_offset: u32 = (tile_x + tile_y) as u32;

                for pos in self.risks.iter_positions() {
                    *risks.get_mut(tile_pos + pos).unwrap() =
                        self.risks.get(pos).unwrap().offset(risk_offset);
                }
            }
        }

        Self::from_risks(risks)
    }

    /// Computes the accumulated risk of the safest path from the start cell to every cell. The
    /// cost of entering a cell is that cell's own risk; the start cell is free, so its total is
    /// always 0.
    pub fn total_risks(&self) -> Grid2D<u32> {
        let mut finder: RiskPathFinder = RiskPathFinder {
            cave: self,
            total_risks: Grid2D::default(self.risks.dimensions()),
        };

        finder.run();

        finder.total_risks
    }

    /// The lowest accumulated risk from the start cell to the end cell.
    pub fn lowest_total_risk(&self) -> u32 {
        let total_risks: Grid2D<u32> = self.total_risks();

        *total_risks.cells().last().unwrap()
    }
}

impl Display for Cave {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        let width: usize = self.risks.dimensions().x as usize;

        for (index, risk) in self.risks.cells().iter().enumerate() {
            Display::fmt(risk, f)?;

            if (index + 1_usize) % width == 0_usize {
                f.write_char('\n')?;
            }
        }

        Ok(())
    }
}

impl<'i> TryFrom<&'i str> for Cave {
    type Error = GridParseError<'i, InvalidRisk>;

    fn try_from(input: &'i str) -> Result<Self, Self::Error> {
        Ok(Self::from_risks(input.try_into()?))
    }
}

struct RiskPathFinder<'c> {
    cave: &'c Cave,
    total_risks: Grid2D<u32>,
}

impl DenseDijkstra for RiskPathFinder<'_> {
    type Cost = u32;

    fn vertex_count(&self) -> usize {
        self.cave.risks.area()
    }

    fn start(&self) -> usize {
        0_usize
    }

    fn neighbors(&self, vertex: usize, neighbors: &mut Vec<(usize, u32)>) {
        neighbors.extend(
            self.cave.neighbors[vertex]
                .iter()
                .map(|neighbor: usize| (neighbor, (*self.cave.risks.cells()[neighbor]) as u32)),
        );
    }

    fn cost_from_start(&self, vertex: usize) -> u32 {
        self.total_risks.cells()[vertex]
    }

    fn update_vertex(&mut self, vertex: usize, cost: u32) {
        self.total_risks.cells_mut()[vertex] = cost;
    }

    fn reset(&mut self) {
        self.total_risks.cells_mut().fill(u32::MAX);
    }
}
