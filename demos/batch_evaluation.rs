use omnicalc::Evaluator;

fn main() {
    pretty_env_logger::init();

    let inputs = vec![
        "1 + 2 * 3".to_string(),
        "(4 - 1) / 2 tail".to_string(),
        "-(-7) * 6".to_string(),
        "no expression".to_string(),
    ];

    let evaluator = Evaluator::default();
    for (i, (input, evaluation)) in inputs
        .iter()
        .zip(evaluator.evaluate_batch(&inputs))
        .enumerate()
    {
        println!("Result {}: {:?} => {:?}", i, input, evaluation);
    }
}
