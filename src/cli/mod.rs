mod args;
mod output;

pub(crate) use args::{CliArgs, Command, OutputFormat, parse_cli};
pub(crate) use output::{SearchReport, print_posts, print_search, print_tree};
