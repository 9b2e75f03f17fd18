pub mod queue_model;
