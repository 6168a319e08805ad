pub mod chart_bridge;
