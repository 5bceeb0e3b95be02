//! Command-line options.

use clap::Parser;

/// How deep the report goes. Each level includes everything below it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DetailLevel {
    Service = 0,
    Collections = 1,
    Items = 2,
    Attributes = 3,
    Secrets = 4,
}

impl DetailLevel {
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            0 => Some(Self::Service),
            1 => Some(Self::Collections),
            2 => Some(Self::Items),
            3 => Some(Self::Attributes),
            4 => Some(Self::Secrets),
            _ => None,
        }
    }

    /// Secrets can only be decrypted over an encrypted session.
    pub fn wants_secrets(self) -> bool {
        self >= Self::Secrets
    }
}

/// Options that drive a single traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    pub detail: DetailLevel,
    pub unlock: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            detail: DetailLevel::Items,
            unlock: false,
        }
    }
}

/// List the contents of the Secret Service keyring
#[derive(Debug, Parser)]
#[command(name = "lssecrets")]
#[command(about = "List collections, items and secrets in the keyring")]
#[command(disable_version_flag = true)]
pub struct Cli {
    /// Report depth: 0 service, 1 collections, 2 items, 3 attributes, 4 secrets
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u8).range(0..=4))]
    pub detail: u8,

    /// Show secret values (same as --detail=4)
    #[arg(short, long)]
    pub secrets: bool,

    /// Try to unlock locked collections and items
    #[arg(short, long)]
    pub unlock: bool,

    /// Print the program version and exit
    #[arg(short = 'v', long)]
    pub version: bool,
}

impl Cli {
    pub fn options(&self) -> Options {
        let detail = if self.secrets {
            DetailLevel::Secrets
        } else {
            DetailLevel::from_level(self.detail).unwrap_or(DetailLevel::Items)
        };
        Options {
            detail,
            unlock: self.unlock,
        }
    }
}

/// The string printed by `--version`.
pub fn version_string() -> String {
    format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("lssecrets").chain(args.iter().copied()))
            .expect("arguments should parse")
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]);
        assert!(!cli.version);
        assert_eq!(cli.options(), Options::default());
    }

    #[test]
    fn test_detail_and_unlock() {
        let options = parse(&["--detail=4", "-u"]).options();
        assert_eq!(options.detail, DetailLevel::Secrets);
        assert!(options.unlock);

        let options = parse(&["-d", "0"]).options();
        assert_eq!(options.detail, DetailLevel::Service);
        assert!(!options.unlock);
    }

    #[test]
    fn test_secrets_shorthand() {
        assert_eq!(parse(&["-s"]).options().detail, DetailLevel::Secrets);
        assert_eq!(
            parse(&["-d", "1", "--secrets"]).options().detail,
            DetailLevel::Secrets
        );
    }

    #[test]
    fn test_detail_out_of_range() {
        assert!(Cli::try_parse_from(["lssecrets", "--detail=5"]).is_err());
        assert!(Cli::try_parse_from(["lssecrets", "-d", "x"]).is_err());
    }

    #[test]
    fn test_short_version_flag() {
        assert!(parse(&["-v"]).version);
        assert!(parse(&["--version"]).version);
    }

    #[test]
    fn test_level_ordering() {
        assert!(DetailLevel::Service < DetailLevel::Collections);
        assert!(DetailLevel::Attributes < DetailLevel::Secrets);
        assert!(DetailLevel::Secrets.wants_secrets());
        assert!(!DetailLevel::Attributes.wants_secrets());
        assert_eq!(DetailLevel::from_level(5), None);
    }
}
