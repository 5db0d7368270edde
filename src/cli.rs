use clap::Parser as ClapParser;
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "pascalc")]
#[command(about = "Recursive-descent compiler front end for a Pascal subset")]
pub struct Cli {
    /// Source file to compile
    pub file: PathBuf,
}
