pub mod errors;
pub mod db;
pub mod global_counter;

#[cfg(test)]
mod tests;
