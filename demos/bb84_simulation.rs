use bb84_sim::prelude::*;

fn format_key(bits: &[Bit], limit: usize) -> String {
    let rendered: String = bits.iter().map(|b| b.to_string()).collect();
    if rendered.len() > limit {
        format!("{}...", &rendered[..limit])
    } else {
        rendered
    }
}

fn main() {
    env_logger::init();

    let params = SimulationParameters::default();
    let result = run_simulation(&params).expect("default parameters are valid");

    println!("BB84 Simulation ({} qubits)", params.n);
    println!("Alice's Raw Key:    {}", format_key(&result.alice_key, 50));
    println!("Bob's Raw Key:      {}", format_key(&result.bob_key, 50));
    println!(
        "Sifted Keys ({} bits): {}",
        result.sifted_alice_key.len(),
        format_key(&result.sifted_alice_key, 50)
    );
    match result.qber {
        Some(qber) => println!("QBER: {:.2}% (exceeded: {})", qber * 100.0, result.qber_exceeded),
        None => println!("QBER: no sampled bits"),
    }
    if let Some(corrected) = &result.error_corrected_bob_key {
        println!(
            "Bob's Corrected Key ({} bits): {}",
            corrected.len(),
            format_key(corrected, 50)
        );
    }
    println!(
        "Final Alice's Key: {}",
        result.final_alice_key.as_deref().unwrap_or("N/A")
    );
    println!(
        "Final Bob's Key:   {}",
        result.final_bob_key.as_deref().unwrap_or("N/A")
    );
    println!("Final keys match: {}", result.keys_match);
}
