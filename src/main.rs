use {
    clap::Parser,
    riskpath::{open_utf8_file, Args, Cave},
};

fn main() {
    let args: Args = Args::parse();

    // SAFETY: This isn't truly safe, we're just hoping nobody touches our file before we're
    // done parsing it
    let result = unsafe {
        open_utf8_file(&args.input_file_path, |input: &str| {
            match Cave::try_from(input) {
                Ok(cave) => {
                    if args.verbose {
                        print!("{cave}");
                    }

                    println!("Part One: {}", cave.lowest_total_risk());
                    println!("Part Two: {}", cave.expand(args.scale).lowest_total_risk());
                }
                Err(error) => {
                    eprintln!(
                        "Failed to parse \"{}\" as a cave:\n{error:#?}",
                        args.input_file_path
                    );
                }
            }
        })
    };

    if let Err(error) = result {
        eprintln!(
            "Failed to open UTF-8 file \"{}\":\n{error}",
            args.input_file_path
        );
    }
}
