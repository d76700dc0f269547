use clap::Parser;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "minzip")]
#[command(version)]
#[command(about = "Write a minimal ZIP archive with stored (uncompressed) entries", long_about = None)]
#[command(after_help = "Examples:\n  \
  minzip                             write hello.txt into minimal.zip\n  \
  minzip out.zip -n note.txt -d hi   single entry note.txt containing \"hi\"\n  \
  minzip docs.zip -a a.txt b.txt     archive files from disk\n  \
  minzip -p | unzip -l /dev/stdin    send the archive to a pipe")]
pub struct Cli {
    /// Output archive path
    #[arg(value_name = "OUTPUT", default_value = "minimal.zip")]
    pub output: PathBuf,

    /// Name of the built-in entry
    #[arg(short = 'n', long = "name", default_value = "hello.txt")]
    pub name: String,

    /// Contents of the built-in entry
    #[arg(short = 'd', long = "data", default_value = "Hello, ZIP!")]
    pub data: String,

    /// Archive these files instead of the built-in entry
    #[arg(short = 'a', long = "add", value_name = "FILE", num_args = 1..)]
    pub add: Vec<PathBuf>,

    /// Write the archive to stdout, no messages
    #[arg(short = 'p')]
    pub pipe: bool,

    /// Overwrite OUTPUT if it exists
    #[arg(short = 'o')]
    pub overwrite: bool,

    /// Verbose logging (per-record offsets)
    #[arg(short = 'v')]
    pub verbose: bool,

    /// Quiet mode (-qq => quieter)
    #[arg(short = 'q', action = clap::ArgAction::Count)]
    pub quiet: u8,
}

impl Cli {
    pub fn is_quiet(&self) -> bool {
        self.quiet > 0 || self.pipe
    }

    pub fn is_very_quiet(&self) -> bool {
        self.quiet > 1
    }

    /// Default tracing filter directive for these flags.
    pub fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.is_very_quiet() {
            "error"
        } else {
            "warn"
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["minzip"]);
        assert_eq!(cli.output, PathBuf::from("minimal.zip"));
        assert_eq!(cli.name, "hello.txt");
        assert_eq!(cli.data, "Hello, ZIP!");
        assert!(cli.add.is_empty());
        assert!(!cli.is_quiet());
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["minzip", "out.zip", "-a", "x.txt", "y.txt", "-o", "-qq"]);
        assert_eq!(cli.output, PathBuf::from("out.zip"));
        assert_eq!(cli.add, vec![PathBuf::from("x.txt"), PathBuf::from("y.txt")]);
        assert!(cli.overwrite);
        assert!(cli.is_very_quiet());
        assert_eq!(cli.log_level(), "error");
    }

    #[test]
    fn test_pipe_is_quiet() {
        let cli = Cli::parse_from(["minzip", "-p", "-v"]);
        assert!(cli.is_quiet());
        assert_eq!(cli.log_level(), "debug");
    }
}
