use std::ffi::OsString;
use std::path::PathBuf;

pub use clap::Parser;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Restore mode
    /// Optional. Start from the last-sent request instead of the
    /// defaults.
    #[clap(
        short = 'l',
        long,
        help = "restore the last-sent request",
        default_value = "false"
    )]
    last: bool,

    /// Import file
    /// Optional. Load the request from an exported JSON file instead of
    /// the default or last-sent composition.
    #[clap(short = 'i', long, value_name = "FILE", help = "import a request file")]
    import: Option<PathBuf>,

    /// Export file
    /// Optional. Write the composed request to FILE as portable JSON.
    #[clap(short = 'e', long, value_name = "FILE", help = "export the request to a file")]
    export: Option<PathBuf>,

    /// Send mode
    /// Optional. Actually send the request after printing the preview.
    #[clap(short = 's', long, help = "send the request", default_value = "false")]
    send: bool,

    /// Verbose mode
    /// Optional. Print response headers along with the body.
    #[clap(
        short = 'v',
        long,
        help = "print verbose output",
        default_value = "false"
    )]
    verbose: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    last: bool,
    import: Option<PathBuf>,
    export: Option<PathBuf>,
    send: bool,
    verbose: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        let args = ClapArgs::parse();
        Self {
            last: args.last,
            import: args.import,
            export: args.export,
            send: args.send,
            verbose: args.verbose,
        }
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        let args = ClapArgs::parse_from(itr);
        Self {
            last: args.last,
            import: args.import,
            export: args.export,
            send: args.send,
            verbose: args.verbose,
        }
    }

    pub fn last(&self) -> bool {
        self.last
    }

    pub fn import(&self) -> Option<&PathBuf> {
        self.import.as_ref()
    }

    pub fn export(&self) -> Option<&PathBuf> {
        self.export.as_ref()
    }

    pub fn send(&self) -> bool {
        self.send
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert!(!args.last());
        assert_eq!(args.import(), None);
        assert_eq!(args.export(), None);
        assert!(!args.send());
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_last() {
        let args = CommandLineArgs::parse_from(["program", "--last"]);
        assert!(args.last());

        let args = CommandLineArgs::parse_from(["program", "-l", "-s"]);
        assert!(args.last());
        assert!(args.send());
    }

    #[test]
    fn test_parse_args_import_file() {
        let args = CommandLineArgs::parse_from(["program", "--import", "req.json"]);
        assert_eq!(args.import(), Some(&PathBuf::from("req.json")));
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-i", "a.json", "-e", "b.json", "-s"]);
        assert_eq!(args.import(), Some(&PathBuf::from("a.json")));
        assert_eq!(args.export(), Some(&PathBuf::from("b.json")));
        assert!(args.send());
    }

    #[test]
    fn test_parse_args_verbose() {
        let args = CommandLineArgs::parse_from(["program", "--send", "--verbose"]);
        assert!(args.send());
        assert!(args.verbose());
    }
}
