mod command;
mod config;
mod flavor;
mod logging;
mod tui;
mod ui;
mod util;

fn main() -> anyhow::Result<()> {
    command::run()
}
