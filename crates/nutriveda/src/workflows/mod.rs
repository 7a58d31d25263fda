pub mod diet_plan;
