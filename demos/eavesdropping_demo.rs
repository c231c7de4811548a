use bb84_sim::prelude::*;

fn main() {
    env_logger::init();

    println!("BB84 Eavesdropping Simulation");

    let params = SimulationParameters {
        n: 1000,
        eve_enabled: true,
        secure_mode: true,
        ..SimulationParameters::default()
    };
    let result = run_simulation(&params).expect("parameters are valid");

    let intercepted = result
        .qubits
        .iter()
        .filter(|q| q.eve_basis.is_some())
        .count();
    let wrong_basis = result
        .qubits
        .iter()
        .filter(|q| q.eve_basis.is_some() && q.eve_basis != Some(q.alice_basis))
        .count();
    println!(
        "Eve intercepted {} qubits, {} in the wrong basis",
        intercepted, wrong_basis
    );

    match result.qber {
        Some(qber) => println!("Observed QBER: {:.2}%", qber * 100.0),
        None => println!("Observed QBER: no sampled bits"),
    }

    if result.qber_exceeded {
        println!("Eavesdropping detected: QBER exceeded the 11% threshold.");
        println!("Session aborted, no key material was produced.");
    } else {
        println!("Eve slipped under the threshold this run.");
        println!(
            "Final keys match: {} (residual errors may remain)",
            result.keys_match
        );
    }

    match verification_status(params.secure_mode, result.qber_exceeded) {
        Some(true) => println!("Classical message authentication: verified"),
        Some(false) => println!("Classical message authentication: failed (session aborted)"),
        None => println!("Classical message authentication: not in secure mode"),
    }
}
