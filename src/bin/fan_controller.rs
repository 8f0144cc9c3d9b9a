use std::error::Error;

use env_logger::Env;
use fuzzy_control::{
    report::Report,
    scenarios::fan_controller,
    settings::{var_f64, Settings},
};
use fuzzy_logic::Simulation;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;
    let temperature = var_f64("FAN_TEMPERATURE", 60.0)?;
    let humidity = var_f64("FAN_HUMIDITY", 40.0)?;

    let system = fan_controller(settings.inference)?;
    let mut sim = Simulation::new(&system);
    sim.set_inputs([("temperature", temperature), ("humidity", humidity)])?;

    if let Err(e) = sim.compute() {
        log::error!("Error in fan controller: {}", e);
        return Err(e.into());
    }

    log::info!("fan_speed = {:.3}", sim.output("fan_speed")?);
    println!("{}", Report::from_simulation(&sim).to_json()?);

    Ok(())
}
