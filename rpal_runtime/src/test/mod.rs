#[cfg(test)]
mod builtins;
#[cfg(test)]
mod config;
#[cfg(test)]
mod toplevel;
