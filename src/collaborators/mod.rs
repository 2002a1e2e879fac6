pub mod classifier;
pub mod sensor;

pub use classifier::{
    pick_label, FallbackClassifier, FixedClassifier, FoodClassifier, Prediction,
    PredictionFileClassifier,
};
pub use sensor::{pump_sensor, FixedScale, SimulatedScale, WeightSensor};
