pub(crate) const HELP_SHORT: &str = "-h";
pub(crate) const HELP_LONG: &str = "--help";
pub(crate) const HELP_MESSAGE: &str = "Show this help message and exit.";

pub(crate) const REQUIRED_MARKER: &str = "(required)";
pub(crate) const COMMAND_GRAMMAR: &str = "COMMAND [args..]";
pub(crate) const OPTIONS_GRAMMAR: &str = "[options...]";

pub(crate) fn is_help(token: &str) -> bool {
    token == HELP_SHORT || token == HELP_LONG
}

pub(crate) fn looks_like_flag(token: &str) -> bool {
    token.starts_with('-')
}
