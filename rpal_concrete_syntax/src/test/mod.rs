#[cfg(test)]
mod parse_pretty;
