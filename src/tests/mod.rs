mod engine;
mod limits;
