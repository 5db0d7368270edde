pub mod cli;
pub mod diagnostics;
pub mod dump;
pub mod error;
pub mod input;
pub mod lexer;
pub mod limits;
pub mod parser;
pub mod symtab;

use clap::Parser as ClapParser;
use cli::Cli;

fn main() {
    std::process::exit(match run() {
        Ok(()) => 0,
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    });
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let project_toml = cli.file.with_file_name("project.toml");
    let limits = match limits::CompilerLimits::from_project_toml(&project_toml) {
        Ok(l) => {
            l.validate()?;
            l
        }
        Err(_) => limits::CompilerLimits::default(),
    };

    let source = input::open_input_stream(&cli.file)?;
    if source.len() > limits.max_input_size {
        return Err(format!(
            "input too large: {} bytes (max: {})",
            source.len(),
            limits.max_input_size
        )
        .into());
    }

    match parser::parse(&source, &limits) {
        Ok((symtab, program)) => {
            print!("{}", dump::dump(&symtab, program));
            Ok(())
        }
        Err(e) => diagnostics::report(&e),
    }
}
