//! Mamdani fuzzy inference: linguistic variables, IF/THEN rules over their terms, and a
//! min/max pipeline (fuzzification, rule firing, implication, aggregation,
//! defuzzification) that turns crisp inputs into crisp outputs.
//!
//! ```
//! use fuzzy_logic::{
//!     shape::triangle, ControlSystem, Expr, LinguisticVar, Rule, Simulation, TermRef, Universe,
//! };
//!
//! # fn main() -> fuzzy_logic::Result<()> {
//! let mut service = LinguisticVar::antecedent("service", Universe::new(0.0, 10.0, 1.0)?);
//! service.automf(3)?;
//! let tip = LinguisticVar::consequent("tip", Universe::new(0.0, 25.0, 1.0)?)
//!     .with_term("low", triangle(0.0, 0.0, 13.0)?)
//!     .with_term("high", triangle(12.0, 25.0, 25.0)?);
//!
//! let rules = vec![
//!     Rule::new(service.is("poor") | service.is("average"), TermRef::new("tip", "low")),
//!     Rule::new(service.is("good"), TermRef::new("tip", "high")),
//! ];
//! let system = ControlSystem::new(vec![service, tip], rules)?;
//!
//! let mut sim = Simulation::new(&system);
//! sim.set_input("service", 9.0)?;
//! sim.compute()?;
//! assert!(sim.output("tip")? > 12.5);
//! # Ok(())
//! # }
//! ```

pub mod automf;
pub mod config;
pub mod defuzz;
pub mod error;
pub mod linguistic;
pub mod ops;
pub mod rule;
pub mod set;
pub mod shape;
pub mod simulation;
pub mod system;
pub mod universe;

pub use config::InferenceConfig;
pub use defuzz::DefuzzifyMethod;
pub use error::{FuzzyError, Result, ValidationError};
pub use linguistic::{LinguisticVar, LinguisticVarKind};
pub use ops::{AndMethod, OrMethod};
pub use rule::{Expr, Rule, TermRef};
pub use shape::MembershipFunction;
pub use simulation::{simulate_batch, OutOfDomain, Simulation};
pub use system::{ControlSystem, ControlSystemBuilder};
pub use universe::Universe;
