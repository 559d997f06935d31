//! CLI module for the mentor registration review client
//!
//! Provides command-line parsing for the `mentor-review` binary. Uses clap
//! for argument parsing and owo-colors for colored terminal output.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use mentor_review_model::StatusFilter;
use std::path::PathBuf;

/// mentor-review - review mentor registrations from the terminal
///
/// Lists pending mentor registrations and approves or rejects them against
/// the platform backend.
#[derive(Parser, Debug)]
#[command(
    name = "mentor-review",
    version,
    about = "Review mentor registrations: list, inspect, approve and reject",
    long_about = "Review mentor registrations submitted to the platform backend.\n\n\
                  Statuses are derived from the backend's verification flags and are\n\
                  re-fetched after every approve or reject.",
    after_help = "EXAMPLES:\n    \
                  mentor-review list --status pending        # Pending applications\n    \
                  mentor-review list --search asha --page 2  # Search by name, email or id\n    \
                  mentor-review show MR-2024-0042            # Full profile\n    \
                  mentor-review approve 65f1c0ab             # Approve by id\n    \
                  mentor-review reject 65f1c0ab -r \"KYC unreadable\"\n    \
                  mentor-review config --validate            # Check the config file"
)]
pub struct Cli {
    /// Path to the configuration file
    #[arg(short, long, default_value = "mentor-review.toml", global = true)]
    pub config: PathBuf,

    /// Override the backend base URL
    #[arg(long, env = "MENTOR_REVIEW_BASE_URL", global = true)]
    pub base_url: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registrations
    List {
        /// Status tab: all, pending, approved or rejected
        #[arg(short, long, default_value = "all", value_parser = parse_status_filter)]
        status: StatusFilter,

        /// Case-insensitive search over name, email and ids
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Page number (1-based)
        #[arg(short, long, default_value_t = 1)]
        page: usize,
    },

    /// Show one registration in full
    Show {
        /// Registration id or internal id
        id: String,
    },

    /// Approve a pending registration
    Approve {
        /// Registration id or internal id
        id: String,
    },

    /// Reject a pending registration
    Reject {
        /// Registration id or internal id
        id: String,

        /// Reason for the rejection (required, must not be blank)
        #[arg(short, long)]
        reason: String,
    },

    /// Show configuration information
    Config {
        /// Validate the configuration file
        #[arg(long)]
        validate: bool,
    },
}

fn parse_status_filter(value: &str) -> Result<StatusFilter, String> {
    value.parse()
}

impl Cli {
    /// Parse CLI arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use mentor_review_model::ReviewStatus;
    use rstest::rstest;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_list_arguments() {
        let cli = Cli::try_parse_from([
            "mentor-review",
            "list",
            "--status",
            "Pending",
            "-q",
            "asha",
            "--page",
            "2",
        ])
        .unwrap();
        match cli.command {
            Commands::List {
                status,
                search,
                page,
            } => {
                assert_eq!(status, StatusFilter::Only(ReviewStatus::Pending));
                assert_eq!(search.as_deref(), Some("asha"));
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_reject_requires_reason() {
        assert!(Cli::try_parse_from(["mentor-review", "reject", "R1"]).is_err());
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["mentor-review", "show", "R1", "--json", "--no-color"]).unwrap();
        assert!(cli.json);
        assert!(cli.no_color);
        assert_eq!(cli.config, PathBuf::from("mentor-review.toml"));
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        assert!(Cli::try_parse_from(["mentor-review", "list", "--status", "archived"]).is_err());
    }

    #[rstest]
    #[case("all", StatusFilter::All)]
    #[case("ALL", StatusFilter::All)]
    #[case("pending", StatusFilter::Only(ReviewStatus::Pending))]
    #[case("approved", StatusFilter::Only(ReviewStatus::Approved))]
    #[case(" Rejected ", StatusFilter::Only(ReviewStatus::Rejected))]
    fn test_status_filter_values(#[case] input: &str, #[case] expected: StatusFilter) {
        assert_eq!(parse_status_filter(input), Ok(expected));
    }
}
