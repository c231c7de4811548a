use bb84_sim::prelude::*;

fn main() {
    env_logger::init();

    let params = SimulationParameters {
        n: 16,
        sample_size: 25,
        block_size: 4,
        final_key_length: 32,
        eve_enabled: true,
        secure_mode: false,
    };
    let result = run_simulation(&params).expect("parameters are valid");

    let json = serde_json::to_string_pretty(&result).expect("result serializes");
    println!("{}", json);
}
