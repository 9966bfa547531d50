use std::env;
use anyhow::Result;
use log::error;
use weather_next::initialization::init;
use weather_next::worker;

fn main() -> Result<()> {
    let config = init(env::args().nth(1))?;

    if let Err(e) = worker::run(&config) {
        error!("{}", e);
        return Err(e.into());
    }

    Ok(())
}
