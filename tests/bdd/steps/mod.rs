mod cli_steps;
mod editor_steps;
