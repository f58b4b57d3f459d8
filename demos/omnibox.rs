//! Reads one input-change event per stdin line and prints the suggestions
//! as `content<TAB>description`.

use omnicalc::omnibox::{Omnibox, Suggestion};
use omnicalc::Config;
use std::io::{self, BufRead};

fn main() {
    pretty_env_logger::init();

    let mut omnibox = Omnibox::new(Config::default());
    let mut print = |suggestions: Vec<Suggestion>| {
        for suggestion in suggestions {
            println!("{}\t{}", suggestion.content, suggestion.description);
        }
    };

    let inputs = io::stdin().lock().lines().map_while(Result::ok);
    omnibox.run(inputs, &mut print);
}
