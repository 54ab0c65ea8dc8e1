mod fixtures;
mod rank;
mod resolver;
