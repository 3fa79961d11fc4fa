use std::ffi::OsString;

pub use clap::Parser;

/// Entity opened when no `--entity` is given
pub const DEFAULT_ENTITY: &str = "aisles";

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct ClapArgs {
    /// Profile name
    /// Profile section to read connection settings from. Default is 'default'.
    /// A profile missing from the file falls back to built-in defaults.
    #[clap(short = 'p', long, default_value = "default", help = "profile name")]
    profile: String,

    /// Verbose mode
    /// Optional. Log request flow at debug level.
    #[clap(
        short = 'v',
        long,
        help = "Print verbose message",
        default_value = "false"
    )]
    verbose: bool,

    /// Entity to open on start (aisles, departments, products, orders)
    #[clap(short = 'e', long, default_value = DEFAULT_ENTITY, help = "entity to open")]
    entity: String,

    /// Print the entity table once and exit
    #[clap(long, help = "Print the table once and exit", default_value = "false")]
    print: bool,
}

#[derive(Debug, Clone)]
pub struct CommandLineArgs {
    profile: String,
    verbose: bool,
    entity: String,
    print: bool,
}

impl CommandLineArgs {
    pub fn parse() -> Self {
        ClapArgs::parse().into()
    }

    pub fn parse_from<I, T>(itr: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        ClapArgs::parse_from(itr).into()
    }

    pub fn profile(&self) -> &String {
        &self.profile
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    pub fn entity(&self) -> &str {
        &self.entity
    }

    pub fn print_only(&self) -> bool {
        self.print
    }
}

impl From<ClapArgs> for CommandLineArgs {
    fn from(args: ClapArgs) -> Self {
        Self {
            profile: args.profile,
            verbose: args.verbose,
            entity: args.entity,
            print: args.print,
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parse_args_profile_only() {
        let args = CommandLineArgs::parse_from(["program", "--profile", "test"]);
        assert_eq!(args.profile(), "test");
        assert!(!args.verbose());
    }

    #[test]
    fn test_parse_args_verbose() {
        let args = CommandLineArgs::parse_from(["program", "--verbose"]);
        assert_eq!(args.profile(), "default");
        assert!(args.verbose());
    }

    #[test]
    fn test_parse_args_short_flags() {
        let args = CommandLineArgs::parse_from(["program", "-p", "dev", "-v", "-e", "orders"]);
        assert_eq!(args.profile(), "dev");
        assert!(args.verbose());
        assert_eq!(args.entity(), "orders");
    }

    #[test]
    fn test_parse_args_print() {
        let args = CommandLineArgs::parse_from(["program", "--print", "--entity", "products"]);
        assert!(args.print_only());
        assert_eq!(args.entity(), "products");
    }

    #[test]
    fn test_default_values() {
        let args = CommandLineArgs::parse_from(["program"]);
        assert_eq!(args.profile(), "default");
        assert!(!args.verbose());
        assert_eq!(args.entity(), DEFAULT_ENTITY);
        assert!(!args.print_only());
    }
}
