use crate::CLAP_STYLING;
use clap::{arg, command};
use url::Url;

pub(crate) fn command_argument_builder() -> clap::Command {
    clap::Command::new("sitecensus")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("sitecensus")
        .styles(CLAP_STYLING)
        .subcommand_required(true)
        .subcommand(
            command!("run")
                .about(
                    "Crawl a website starting from BASE_URL and write a CSV census of \
                     every page reached on the same host",
                )
                .arg(
                    arg!(<BASE_URL>)
                        .help("The seed URL; its host bounds the crawl")
                        .value_parser(clap::value_parser!(Url)),
                )
                .arg(
                    arg!(<MAX_CONCURRENCY>)
                        .help("Maximum number of fetches in flight at once")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    arg!(<MAX_PAGES>)
                        .help("Maximum number of distinct pages to fetch")
                        .value_parser(clap::value_parser!(usize)),
                ),
        )
}
