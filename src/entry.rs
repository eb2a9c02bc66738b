use std::ffi::OsString;
use std::path::Path;

use clap::{ArgMatches, CommandFactory, FromArgMatches};

use crate::app::run_stress;
use crate::args::StressArgs;
use crate::config::DEFAULT_CONFIG_FILES;
use crate::error::AppResult;

/// Parses arguments, merges the config file, and runs the stress test.
///
/// # Errors
///
/// Returns an error for invalid arguments or configuration, an unavailable
/// identifier source, or a client that cannot be built.
pub fn run() -> AppResult<()> {
    let Some((mut args, matches)) = parse_args()? else {
        return Ok(());
    };
    apply_config(&mut args, &matches)?;

    crate::logger::init_logging(args.verbose, args.no_color);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    runtime.block_on(run_stress(&args))?;
    Ok(())
}

fn parse_args() -> AppResult<Option<(StressArgs, ArgMatches)>> {
    let mut cmd = StressArgs::command();
    let raw_args: Vec<OsString> = std::env::args_os().collect();

    if should_show_help(&raw_args) {
        cmd.print_help()?;
        println!();
        return Ok(None);
    }

    let matches = cmd.get_matches_from(raw_args);
    let args = StressArgs::from_arg_matches(&matches)?;

    Ok(Some((args, matches)))
}

fn should_show_help(raw_args: &[OsString]) -> bool {
    let treat_as_empty =
        matches!(raw_args, [] | [_]) || matches!(raw_args, [_, second] if second == "--");
    if !treat_as_empty {
        return false;
    }

    !has_default_config()
}

fn has_default_config() -> bool {
    DEFAULT_CONFIG_FILES
        .iter()
        .any(|path| Path::new(path).exists())
}

fn apply_config(args: &mut StressArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_shown_only_for_empty_invocations() -> Result<(), String> {
        let empty = vec![OsString::from("ochl-stress")];
        let separator = vec![OsString::from("ochl-stress"), OsString::from("--")];
        let with_url = vec![
            OsString::from("ochl-stress"),
            OsString::from("-u"),
            OsString::from("http://localhost"),
        ];
        let expect_help = !has_default_config();
        if should_show_help(&empty) != expect_help || should_show_help(&separator) != expect_help
        {
            return Err("Empty invocation should follow default config presence".to_owned());
        }
        if should_show_help(&with_url) {
            return Err("Explicit arguments should not show help".to_owned());
        }
        Ok(())
    }
}
