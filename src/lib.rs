//! A weighted-grid shortest-path solver: Dijkstra's algorithm over a binary min-heap with
//! position tracking, so that relaxing a neighbor is an O(log n) decrease-key instead of a
//! stale duplicate push.
//!
//! The grid is a cave of single-digit risk levels ([`Cave`]); the answer is the lowest
//! accumulated risk of a path from the top-left cell to the bottom-right cell, for both the
//! base grid and its tile-expanded variant ([`Cave::expand`]).

pub use {cave::*, grid::*, heap::*, search::*};

use {
    clap::Parser,
    memmap::Mmap,
    std::{
        fs::File,
        io::{Error as IoError, ErrorKind, Result as IoResult},
        str::{from_utf8, Utf8Error},
    },
};

pub mod cave;
pub mod grid;
pub mod heap;
pub mod search;

/// Arguments for program execution
#[derive(Debug, Parser)]
pub struct Args {
    /// Input file path
    #[arg(short, long, default_value = "input.txt")]
    pub input_file_path: String,

    /// Tile-expansion factor for the second question
    #[arg(short, long, default_value_t = 5_i32, value_parser = clap::value_parser!(i32).range(1..))]
    pub scale: i32,

    /// Print extra information, if there is any
    #[arg(short, long, default_value_t)]
    pub verbose: bool,
}

/// Opens a memory-mapped UTF-8 file at a specified path, and passes a `&str` over the file to a
/// provided callback function
///
/// # Errors
///
/// This function returns a `Result::Err`-wrapped `std::io::Error` if an error has occurred.
/// Possible causes are:
///
/// * `std::fs::File::open` was unable to open a read-only file at `file_path`
/// * `memmap::Mmap::map` fails to create an `Mmap` instance for the opened file
/// * `std::str::from_utf8` determines the file is not in valid UTF-8 format
///
/// `f` is only executed *iff* an error is not encountered.
///
/// # Safety
///
/// This function uses `Mmap::map`, which is an unsafe function. There is no guarantee that an
/// external process won't modify the file while this function is referring to it as an
/// immutable string slice.
pub unsafe fn open_utf8_file<T, F: FnOnce(&str) -> T>(file_path: &str, f: F) -> IoResult<T> {
    let file: File = File::open(file_path)?;

    // SAFETY: This operation is unsafe
    let mmap: Mmap = Mmap::map(&file)?;
    let bytes: &[u8] = &mmap;
    let utf8_str: &str = from_utf8(bytes).map_err(|utf8_error: Utf8Error| -> IoError {
        IoError::new(ErrorKind::InvalidData, utf8_error)
    })?;

    Ok(f(utf8_str))
}
