//! The two reference controllers: fan speed from temperature and humidity, and the
//! tipping problem.

use fuzzy_logic::{
    shape::{trapezoid, triangle},
    ControlSystem, Expr, InferenceConfig, LinguisticVar, Result, Rule, TermRef, Universe,
};

fn title(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn fan_rule(temperature: &str, humidity: &str, speed: &str) -> Rule {
    let label = format!(
        "If Temperature is {} and Humidity is {} Then Fan Speed is {}",
        title(temperature),
        title(humidity),
        title(speed)
    );
    Rule::new(
        Expr::term("temperature", temperature) & Expr::term("humidity", humidity),
        TermRef::new("fan_speed", speed),
    )
    .label(&label)
}

/// Temperature in [10, 40], humidity in [20, 100], fan speed in [0, 100].
pub fn fan_controller(config: InferenceConfig) -> Result<ControlSystem> {
    let temperature = LinguisticVar::antecedent("temperature", Universe::new(10.0, 40.0, 1.0)?)
        .with_term("cold", triangle(10.0, 10.0, 25.0)?)
        .with_term("medium", triangle(15.0, 25.0, 35.0)?)
        .with_term("hot", triangle(25.0, 40.0, 40.0)?);

    let humidity = LinguisticVar::antecedent("humidity", Universe::new(20.0, 100.0, 1.0)?)
        .with_term("wet", triangle(20.0, 20.0, 60.0)?)
        .with_term("normal", trapezoid(30.0, 45.0, 75.0, 90.0)?)
        .with_term("dry", triangle(60.0, 100.0, 100.0)?);

    let fan_speed = LinguisticVar::consequent("fan_speed", Universe::new(0.0, 100.0, 1.0)?)
        .with_term("slow", triangle(0.0, 0.0, 50.0)?)
        .with_term("moderate", triangle(10.0, 50.0, 90.0)?)
        .with_term("fast", triangle(50.0, 100.0, 100.0)?);

    let rules = vec![
        fan_rule("cold", "dry", "slow"),
        fan_rule("medium", "dry", "slow"),
        fan_rule("cold", "wet", "slow"),
        fan_rule("hot", "dry", "moderate"),
        fan_rule("medium", "normal", "moderate"),
        fan_rule("cold", "wet", "moderate"),
        fan_rule("hot", "normal", "fast"),
        fan_rule("hot", "wet", "fast"),
        fan_rule("medium", "wet", "fast"),
    ];

    ControlSystem::builder()
        .variable(temperature)
        .variable(humidity)
        .variable(fan_speed)
        .rules(rules)
        .config(config)
        .build()
}

/// Quality and service in [0, 10] with generated terms, tip in [0, 25].
pub fn tipping(config: InferenceConfig) -> Result<ControlSystem> {
    let mut quality = LinguisticVar::antecedent("quality", Universe::new(0.0, 10.0, 1.0)?);
    let mut service = LinguisticVar::antecedent("service", Universe::new(0.0, 10.0, 1.0)?);
    quality.automf(3)?;
    service.automf(3)?;

    let tip = LinguisticVar::consequent("tip", Universe::new(0.0, 25.0, 1.0)?)
        .with_term("poor", triangle(0.0, 0.0, 13.0)?)
        .with_term("average", triangle(0.0, 13.0, 25.0)?)
        .with_term("good", triangle(0.0, 25.0, 25.0)?);

    let rules = vec![
        Rule::new(quality.is("poor") | service.is("poor"), TermRef::new("tip", "poor"))
            .label("quality(poor) | service(poor) -> tip(poor)"),
        Rule::new(quality.is("average"), TermRef::new("tip", "average"))
            .label("quality(average) -> tip(average)"),
        Rule::new(quality.is("good") | service.is("good"), TermRef::new("tip", "good"))
            .label("quality(good) | service(good) -> tip(good)"),
    ];

    ControlSystem::builder()
        .variable(quality)
        .variable(service)
        .variable(tip)
        .rules(rules)
        .config(config)
        .build()
}

#[cfg(test)]
mod tests {
    use std::thread;

    use float_cmp::approx_eq;
    use fuzzy_logic::{set::FuzzySet, FuzzyError, Simulation};

    use super::*;

    fn fan_speed(system: &ControlSystem, temperature: f64, humidity: f64) -> f64 {
        let mut sim = Simulation::new(system);
        sim.set_inputs([("temperature", temperature), ("humidity", humidity)]).unwrap();
        sim.compute().unwrap();
        sim.output("fan_speed").unwrap()
    }

    #[test]
    fn test_fan_rule_labels() {
        let system = fan_controller(InferenceConfig::default()).unwrap();
        let rules = system.rules();

        assert_eq!(rules.len(), 9);
        assert_eq!(
            rules[0].name(),
            "If Temperature is Cold and Humidity is Dry Then Fan Speed is Slow"
        );
        assert_eq!(
            rules[4].name(),
            "If Temperature is Medium and Humidity is Normal Then Fan Speed is Moderate"
        );
    }

    #[test]
    fn test_tipping_best_service() {
        let system = tipping(InferenceConfig::default()).unwrap();
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("quality", 10.0), ("service", 10.0)]).unwrap();
        sim.compute().unwrap();

        assert_eq!(sim.rule_strengths(), &[0.0, 0.0, 1.0]);

        let tip = system.variable("tip").unwrap();
        let good = FuzzySet::new(tip.universe(), tip.term("good").unwrap());
        let expected = good.centroid_defuzz().unwrap();
        let output = sim.output("tip").unwrap();

        assert!(approx_eq!(f64, output, expected, epsilon = 1e-9));
        assert!(approx_eq!(f64, output, 17.0, epsilon = 1e-9));
    }

    #[test]
    fn test_tipping_generated_terms() {
        let system = tipping(InferenceConfig::default()).unwrap();
        let quality = system.variable("quality").unwrap();

        let names = quality.terms().iter().map(|t| t.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["poor", "average", "good"]);
        assert_eq!(quality.term("average").unwrap().parameters(), vec![0.0, 5.0, 10.0]);
    }

    #[test]
    fn test_fan_hot_outside_universe() {
        let system = fan_controller(InferenceConfig::default()).unwrap();
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("temperature", 60.0), ("humidity", 40.0)]).unwrap();
        sim.compute().unwrap();

        assert_eq!(sim.warnings().len(), 1);
        assert_eq!(sim.warnings()[0].var, "temperature");

        // 60 is read as the universe bound 40, where only "hot" holds
        let strengths = sim.rule_strengths();
        assert!(approx_eq!(f64, strengths[6], 2.0 / 3.0, epsilon = 1e-12));
        assert!(approx_eq!(f64, strengths[7], 0.5, epsilon = 1e-12));
        assert!(strengths
            .iter()
            .enumerate()
            .all(|(i, s)| i == 6 || i == 7 || *s == 0.0));

        let fan_speed = system.variable("fan_speed").unwrap();
        let fast = FuzzySet::new(fan_speed.universe(), fan_speed.term("fast").unwrap());
        let expected = fast.min(strengths[6]).centroid_defuzz().unwrap();
        let output = sim.output("fan_speed").unwrap();

        assert!(approx_eq!(f64, output, expected, epsilon = 1e-9));
        assert!(output > 50.0 && output < 100.0);
    }

    #[test]
    fn test_fan_unclipped_input_has_no_activation() {
        let config = InferenceConfig::default().with_clip_to_bounds(false);
        let system = fan_controller(config).unwrap();
        let mut sim = Simulation::new(&system);
        sim.set_inputs([("temperature", 60.0), ("humidity", 40.0)]).unwrap();

        assert_eq!(sim.compute(), Err(FuzzyError::NoActivation("fan_speed".to_string())));
    }

    #[test]
    fn test_fan_dry_monotone_segments() {
        let system = fan_controller(InferenceConfig::default()).unwrap();

        for (start, end) in [(10.0, 19.0), (25.0, 40.0)] {
            let mut t = start;
            let mut previous = fan_speed(&system, t, 100.0);
            while t < end {
                t += 0.25;
                let speed = fan_speed(&system, t, 100.0);
                assert!(speed >= previous - 1e-9, "{} at {} after {}", speed, t, previous);
                previous = speed;
            }
        }

        assert!(fan_speed(&system, 40.0, 100.0) > fan_speed(&system, 10.0, 100.0));
    }

    #[test]
    fn test_fan_dry_dip_where_cold_meets_medium() {
        let system = fan_controller(InferenceConfig::default()).unwrap();

        // slow fires at 0.4 at 19 degrees and at 1.0 at 25 degrees
        let crossing = fan_speed(&system, 19.0, 100.0);
        let medium = fan_speed(&system, 25.0, 100.0);
        assert!(crossing > medium);
    }

    #[test]
    fn test_shared_system_across_threads() {
        let system = fan_controller(InferenceConfig::default()).unwrap();
        let temperatures = [12.0, 18.0, 24.0, 30.0, 36.0];

        let sequential = temperatures
            .iter()
            .map(|t| fan_speed(&system, *t, 50.0))
            .collect::<Vec<_>>();

        let parallel = thread::scope(|s| {
            let handles = temperatures
                .iter()
                .map(|t| {
                    let system = &system;
                    s.spawn(move || fan_speed(system, *t, 50.0))
                })
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });

        assert_eq!(sequential, parallel);
    }
}
