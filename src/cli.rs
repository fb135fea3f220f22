use clap::{ArgAction, Parser};

/// Default for `--dry`. The tool suppresses all writes unless explicitly
/// told otherwise; pass `--dry=false` to sync for real.
pub const DRY_RUN_DEFAULT: bool = true;

#[derive(Debug, Parser)]
#[command(
    name = "shortcut-sync",
    version,
    about = "One-way sync of GitHub issues into Shortcut stories"
)]
pub struct Args {
    /// Print planned creates/updates/closes without sending any writes
    #[arg(
        short,
        long,
        action = ArgAction::Set,
        num_args = 0..=1,
        default_value_t = DRY_RUN_DEFAULT,
        default_missing_value = "true"
    )]
    pub dry: bool,
}

#[cfg(test)]
mod tests {
    use super::Args;
    use clap::Parser;

    #[test]
    fn dry_run_is_the_default() {
        let args = Args::parse_from(["shortcut-sync"]);
        assert!(args.dry);
    }

    #[test]
    fn short_flag_keeps_dry_run_on() {
        let args = Args::parse_from(["shortcut-sync", "-d"]);
        assert!(args.dry);
    }

    #[test]
    fn dry_false_enables_live_mode() {
        let args = Args::parse_from(["shortcut-sync", "--dry=false"]);
        assert!(!args.dry);
    }

    #[test]
    fn rejects_unknown_flags() {
        let result = Args::try_parse_from(["shortcut-sync", "--force"]);
        assert!(result.is_err());
    }
}
