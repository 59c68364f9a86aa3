use ferrite_dnn::data::toy::builtin_and;
use ferrite_dnn::{train_loop, TrainConfig};

fn main() {
    let data = builtin_and();
    let config = TrainConfig::new(vec![4], 1.0, 3000, 1);

    let outcome = match train_loop(&data, &data, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            eprintln!("training failed: {e}");
            std::process::exit(1);
        }
    };

    for (i, row) in outcome.history.rows().iter().enumerate() {
        if i % 500 == 0 {
            println!("Iteration {}: loss = {:.6}, accuracy = {:.2}", i + 1, row[0], row[2]);
        }
    }

    let probabilities = match outcome.network.predict_proba(&data.features) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("prediction failed: {e}");
            std::process::exit(1);
        }
    };
    let inputs = data.features.transpose();
    for (input, p) in inputs.data.iter().zip(probabilities.values()) {
        println!("Input: {:?} -> Output: {:.4} -> {}", input, p, (p >= 0.5) as u8);
    }
}
