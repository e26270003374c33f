mod test_levels;
mod test_moves;
