use std::error::Error;

use env_logger::Env;
use fuzzy_control::{
    report::Report,
    scenarios::tipping,
    settings::{var_f64, Settings},
};
use fuzzy_logic::Simulation;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let settings = Settings::from_env()?;
    let quality = var_f64("TIP_QUALITY", 10.0)?;
    let service = var_f64("TIP_SERVICE", 10.0)?;

    let system = tipping(settings.inference)?;
    let mut sim = Simulation::new(&system);
    sim.set_inputs([("quality", quality), ("service", service)])?;

    match sim.compute() {
        Ok(()) => log::info!("tip = {:.3}", sim.output("tip")?),
        Err(e) => {
            log::error!("Error in tipping: {}", e);
            return Err(e.into());
        }
    }

    println!("{}", Report::from_simulation(&sim).to_json()?);

    Ok(())
}
