use perceptron_net::{dataset::case::and_table, Hyperparameters, Network, Trainer};

fn main() {
    env_logger::init();

    let network = Network::build(vec![2, 2, 1]).expect("valid topology");
    let hyperparameters = Hyperparameters::new(0.5, 0.01, 10000, -1.5, 1.5);

    let mut trainer = Trainer::new(network, and_table(), hyperparameters).expect("valid run");
    trainer.randomize_weights();

    let report = trainer.train().expect("training does not diverge");
    println!("{:?} after {} steps, error = {:.6}", report.state, report.steps, report.final_error);

    let outputs = trainer.final_outputs();
    for (case, output) in trainer.cases().iter().zip(outputs.iter()) {
        println!("Input: {:?} -> Output: {:.4} (expected {})", case.input, output[0], case.expected[0]);
    }
    println!("Weights: {:?}", trainer.network().current_weights());
}
