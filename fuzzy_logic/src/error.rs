pub type Result<T> = std::result::Result<T, FuzzyError>;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum FuzzyError {
    #[error("Invalid universe: min {min}, max {max}, step {step}")]
    InvalidUniverse { min: f64, max: f64, step: f64 },

    #[error("Invalid {shape} parameters {parameters:?}")]
    InvalidShape {
        shape: &'static str,
        parameters: Vec<f64>,
    },

    #[error("Cannot generate {0} membership functions automatically")]
    AutoMf(usize),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Input \"{0}\" is required but was not set")]
    MissingInput(String),

    #[error("No rule activated any term of output \"{0}\"")]
    NoActivation(String),

    #[error("This linguistic variable \"{0}\" does not exist")]
    UnknownVariable(String),

    #[error("The linguistic variable \"{0}\" is not an antecedent")]
    NotAnInput(String),

    #[error("The linguistic variable \"{0}\" is not a consequent")]
    NotAnOutput(String),

    #[error("Output \"{0}\" has not been computed")]
    NoOutput(String),
}

/// Referential integrity failures found while assembling a
/// [`ControlSystem`](crate::system::ControlSystem).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Rule {rule} (\"{label}\") references the undeclared linguistic variable \"{var}\"")]
    UnknownVariable {
        rule: usize,
        label: String,
        var: String,
    },

    #[error("Rule {rule} (\"{label}\") references the undeclared term \"{term}\" of \"{var}\"")]
    UnknownTerm {
        rule: usize,
        label: String,
        var: String,
        term: String,
    },

    #[error("Rule {rule} (\"{label}\") reads the consequent \"{var}\" in its condition")]
    AntecedentIsOutput {
        rule: usize,
        label: String,
        var: String,
    },

    #[error("Rule {rule} (\"{label}\") assigns to the antecedent \"{var}\"")]
    ConsequentIsInput {
        rule: usize,
        label: String,
        var: String,
    },

    #[error("Rule {rule} (\"{label}\") has no consequent")]
    NoConsequent { rule: usize, label: String },

    #[error("Rule {rule} (\"{label}\") has weight {weight}, expected a value in (0, 1]")]
    InvalidWeight {
        rule: usize,
        label: String,
        weight: f64,
    },

    #[error("The linguistic variable \"{0}\" is declared twice")]
    DuplicateVariable(String),

    #[error("The linguistic variable \"{0}\" has no terms")]
    EmptyVariable(String),

    #[error("The consequent \"{0}\" is not the target of any rule")]
    UnreachableOutput(String),
}
