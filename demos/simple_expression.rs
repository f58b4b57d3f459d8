use log::debug;
use omnicalc::Evaluator;

fn main() {
    pretty_env_logger::init();

    let evaluator = Evaluator::default();

    for input in ["2+3*4", "2+3*", "(1+2)*3", "10/0", "1+(2+3", "abc", ""] {
        let evaluation = evaluator.evaluate(input);
        let (recognized, trailing) = evaluation.split(input);
        println!(
            "{:?} => value {} (recognized {:?}, trailing {:?})",
            input, evaluation.value, recognized, trailing
        );
    }

    let expression = "(10 + 20) * 3 / (4 - 1) + 5";
    match evaluator.parse_expression(expression) {
        Ok(parsed) => {
            debug!("ast: {:?}", parsed.ast);
            println!("Result: {}", evaluator.evaluate_ast(&parsed.ast));
        }
        Err(err) => println!("Error: {}", err),
    }
}
