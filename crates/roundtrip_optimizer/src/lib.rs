pub mod algorithm;
pub mod cost_matrix;
pub mod genetic;
pub mod json;
pub mod mst;
pub mod route;
pub mod solver;
