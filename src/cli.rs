//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::Parser;

use portal_dl::DEFAULT_YEAR;

/// Batch download course document archives from the university portal.
///
/// portal-dl logs into the portal through its federated identity provider,
/// collects the courses enrolled for an academic year, and downloads each
/// course's generated document archive into the output directory.
#[derive(Parser, Debug)]
#[command(name = "portal-dl")]
#[command(author, version, about)]
pub struct Args {
    /// Directory the course archives are saved into (must already exist;
    /// it is also used as the browser's download directory)
    pub output_dir: PathBuf,

    /// WebDriver endpoint of a running chromedriver
    #[arg(long, default_value = "http://localhost:9515")]
    pub webdriver_url: String,

    /// Academic year of the curriculum listing
    #[arg(long, default_value_t = DEFAULT_YEAR, value_parser = clap::value_parser!(u16).range(2000..=2099))]
    pub year: u16,

    /// Run the browser headless
    #[arg(long)]
    pub headless: bool,

    /// Increase output verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error output (overrides --verbose)
    #[arg(short, long)]
    pub quiet: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_output_dir_is_required() {
        let result = Args::try_parse_from(["portal-dl"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::MissingRequiredArgument);
    }

    #[test]
    fn test_cli_defaults_with_output_dir() {
        let args = Args::try_parse_from(["portal-dl", "./archives"]).unwrap();
        assert_eq!(args.output_dir, PathBuf::from("./archives"));
        assert_eq!(args.webdriver_url, "http://localhost:9515");
        assert_eq!(args.year, 2019); // DEFAULT_YEAR
        assert!(!args.headless);
        assert_eq!(args.verbose, 0);
        assert!(!args.quiet);
    }

    #[test]
    fn test_cli_extra_positional_rejected() {
        let result = Args::try_parse_from(["portal-dl", "./archives", "extra"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }

    #[test]
    fn test_cli_webdriver_url_flag() {
        let args =
            Args::try_parse_from(["portal-dl", ".", "--webdriver-url", "http://localhost:4444"])
                .unwrap();
        assert_eq!(args.webdriver_url, "http://localhost:4444");
    }

    #[test]
    fn test_cli_year_flag() {
        let args = Args::try_parse_from(["portal-dl", ".", "--year", "2020"]).unwrap();
        assert_eq!(args.year, 2020);
    }

    #[test]
    fn test_cli_year_out_of_range_rejected() {
        let result = Args::try_parse_from(["portal-dl", ".", "--year", "1999"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::ValueValidation);
    }

    #[test]
    fn test_cli_headless_flag() {
        let args = Args::try_parse_from(["portal-dl", ".", "--headless"]).unwrap();
        assert!(args.headless);
    }

    #[test]
    fn test_cli_verbose_flag_increments_count() {
        let args = Args::try_parse_from(["portal-dl", ".", "-v"]).unwrap();
        assert_eq!(args.verbose, 1);

        let args = Args::try_parse_from(["portal-dl", ".", "-vv"]).unwrap();
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn test_cli_quiet_flag_sets_quiet() {
        let args = Args::try_parse_from(["portal-dl", ".", "-q"]).unwrap();
        assert!(args.quiet);
    }

    #[test]
    fn test_cli_quiet_and_verbose_both_accepted() {
        // Precedence between the two is resolved at logging setup, not parse time.
        let args = Args::try_parse_from(["portal-dl", ".", "-q", "-v"]).unwrap();
        assert!(args.quiet);
        assert_eq!(args.verbose, 1);
    }

    #[test]
    fn test_cli_help_flag_shows_usage() {
        // --help causes early exit, so we check it returns an error with Help kind
        let result = Args::try_parse_from(["portal-dl", "--help"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayHelp);
    }

    #[test]
    fn test_cli_version_flag_shows_version() {
        // --version causes early exit, so we check it returns an error with Version kind
        let result = Args::try_parse_from(["portal-dl", "--version"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::DisplayVersion);
    }

    #[test]
    fn test_cli_invalid_flag_returns_error() {
        let result = Args::try_parse_from(["portal-dl", ".", "--invalid-flag"]);
        assert!(result.is_err());
        let err = result.unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::UnknownArgument);
    }
}
