//! End-to-end pipeline tests for the predefined pass sequences.

use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;

use alsvid_ir::{Circuit, ClbitId, PauliWord, QubitId, StandardGate};
use alsvid_transpile::passes::{Decompose, GateFusion, RemoveTrivialRz, Tfuse, ToPbc};
use alsvid_transpile::{sequences, Pass, PassConfig, PassType, RzSynthesizer, Transpiler};

fn silent() -> PassConfig {
    PassConfig {
        silent: true,
        ..PassConfig::default()
    }
}

/// Fixed-word stand-in for a real Ross–Selinger backend. The tests here
/// check structural properties of the output, not unitary closeness.
struct StubSynth;

impl RzSynthesizer for StubSynth {
    fn synth(&self, _angle: f64, _epsilon: f64) -> Vec<StandardGate> {
        vec![
            StandardGate::H,
            StandardGate::T,
            StandardGate::H,
            StandardGate::S,
            StandardGate::T,
        ]
    }
}

#[test]
fn scenario_clifford_t_pipeline() {
    let mut circuit = Circuit::with_size("scenario1", 2, 1);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.rz(FRAC_PI_4, QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.h(QubitId(0)).unwrap();
    circuit.measure(QubitId(1), ClbitId(0)).unwrap();

    let config = PassConfig {
        epsilon_override: 1e-10,
        ..silent()
    };
    let out = Transpiler::with_synthesizer(Arc::new(StubSynth))
        .execute(circuit, sequences::TO_CLIFFORD_T, &config)
        .unwrap();

    assert!(out.is_clifford_t());
    assert!(out.depth() >= 5);
    assert!(out.t_count() >= 1);
    assert_eq!(out.num_qubits(), 2);
    assert_eq!(out.num_clbits(), 1);
}

#[test]
fn scenario_zero_rz_removed() {
    let mut circuit = Circuit::with_size("scenario2", 1, 0);
    circuit.rz(0.0, QubitId(0)).unwrap();

    let modified = RemoveTrivialRz::new().run(&mut circuit).unwrap();
    assert!(modified);
    assert_eq!(circuit.num_ops(), 0);
}

#[test]
fn scenario_hh_fused_away() {
    let mut circuit = Circuit::with_size("scenario3", 1, 0);
    circuit.h(QubitId(0)).unwrap().h(QubitId(0)).unwrap();

    let modified = GateFusion::new().run(&mut circuit).unwrap();
    assert!(modified);
    assert_eq!(circuit.num_ops(), 0);
}

#[test]
fn scenario_ccx_decomposition() {
    let mut circuit = Circuit::with_size("scenario4", 3, 0);
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

    let modified = Decompose::new(false).run(&mut circuit).unwrap();
    assert!(modified);
    assert_eq!(circuit.count_ops().get("ccx"), None);
    assert_eq!(circuit.t_count(), 7);
}

#[test]
fn scenario_pbc_conversion() {
    let mut circuit = Circuit::with_size("scenario5", 2, 0);
    circuit.h(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.t(QubitId(1)).unwrap();
    circuit.h(QubitId(0)).unwrap();

    let out = Transpiler::new()
        .execute(circuit, sequences::TO_PBC, &silent())
        .unwrap();

    assert!(out.is_pbc());
    assert_eq!(out.num_ops(), 1);
    assert_eq!(out.ops()[0].name(), "t_pauli");
    assert_eq!(
        out.ops()[0].pauli_word(),
        Some(&PauliWord::parse("+ZZ").unwrap())
    );
    assert_eq!(out.depth(), 1);
}

#[test]
fn scenario_tfuse_combines_rotations() {
    let mut circuit = Circuit::with_size("scenario6", 2, 0);
    circuit.t_pauli("+ZI").unwrap();
    circuit.t_pauli("+ZI").unwrap();
    circuit.t_pauli("+ZI").unwrap();

    let modified = Tfuse::new().run(&mut circuit).unwrap();
    assert!(modified);
    assert_eq!(circuit.num_ops(), 2);
    assert_eq!(circuit.ops()[0].name(), "s_pauli");
    assert_eq!(circuit.ops()[1].name(), "t_pauli");
    assert_eq!(
        circuit.ops()[0].pauli_word(),
        Some(&PauliWord::parse("+ZI").unwrap())
    );
}

#[test]
fn qubit_and_clbit_counts_preserved_by_every_sequence() {
    let all_sequences: &[&[PassType]] = &[
        sequences::TO_CLIFFORD_T,
        sequences::TO_CLIFFORD_T_RZ,
        sequences::TO_PBC,
        sequences::TO_PBC_OPTIMIZED,
        sequences::TO_CLIFFORD_REDUCTION,
        sequences::CLEANUP,
    ];
    for seq in all_sequences {
        let mut circuit = Circuit::with_size("inv", 3, 2);
        circuit.sx(QubitId(0)).unwrap();
        circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
        circuit.rz(FRAC_PI_4, QubitId(1)).unwrap();
        circuit.measure(QubitId(2), ClbitId(0)).unwrap();

        let out = Transpiler::with_synthesizer(Arc::new(StubSynth))
            .execute(circuit, seq, &silent())
            .unwrap();
        assert_eq!(out.num_qubits(), 3);
        assert_eq!(out.num_clbits(), 2);
    }
}

#[test]
fn decompose_is_idempotent() {
    let mut circuit = Circuit::with_size("inv", 3, 0);
    circuit.swap(QubitId(0), QubitId(1)).unwrap();
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();
    circuit.ry(0.4, QubitId(2)).unwrap();

    let pass = Decompose::new(false);
    assert!(pass.run(&mut circuit).unwrap());
    let snapshot = circuit.clone();
    assert!(!pass.run(&mut circuit).unwrap());
    assert_eq!(circuit, snapshot);
}

#[test]
fn synthesis_leaves_clifford_t() {
    let mut circuit = Circuit::with_size("inv", 2, 0);
    circuit.rx(0.3, QubitId(0)).unwrap();
    circuit.ry(1.1, QubitId(1)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();

    let out = Transpiler::with_synthesizer(Arc::new(StubSynth))
        .execute(circuit, sequences::TO_CLIFFORD_T, &silent())
        .unwrap();
    assert!(out.is_clifford_t());
    assert_eq!(out.count_ops().get("rz"), None);
}

#[test]
fn pbc_output_is_pure_pauli_form() {
    let mut circuit = Circuit::with_size("inv", 3, 3);
    circuit.h(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.tdg(QubitId(2)).unwrap();
    circuit.barrier_all().unwrap();
    circuit.measure_all().unwrap();

    let out = Transpiler::new()
        .execute(circuit, sequences::TO_PBC, &silent())
        .unwrap();

    assert!(out.is_pbc());
    for op in out.ops() {
        assert!(matches!(
            op.name(),
            "t_pauli" | "s_pauli" | "z_pauli" | "m_pauli" | "barrier"
        ));
        if let Some(word) = op.pauli_word() {
            assert_eq!(word.len(), 3);
        }
    }
}

#[test]
fn tfuse_never_increases_t_count() {
    let words = ["+ZII", "+XZI", "-ZII", "+IZZ", "+XZI", "+ZII"];
    let mut circuit = Circuit::with_size("inv", 3, 0);
    for w in words {
        circuit.t_pauli(w).unwrap();
    }
    let before = circuit.t_count();

    Tfuse::new().run(&mut circuit).unwrap();
    assert!(circuit.t_count() <= before);
}

#[test]
fn clifford_reduction_pipeline_is_pbc_without_cliffords() {
    let mut circuit = Circuit::with_size("inv", 2, 2);
    circuit.h(QubitId(0)).unwrap();
    circuit.t(QubitId(0)).unwrap();
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.measure_all().unwrap();

    let out = Transpiler::new()
        .execute(circuit, sequences::TO_CLIFFORD_REDUCTION, &silent())
        .unwrap();
    assert!(out.is_pbc());
    let counts = out.count_ops();
    assert_eq!(counts.get("s_pauli"), None);
    assert_eq!(counts.get("z_pauli"), None);
    assert_eq!(counts.get("m_pauli"), Some(&2));
}

#[test]
fn depth_of_empty_circuit_is_zero() {
    let circuit = Circuit::with_size("empty", 4, 0);
    assert_eq!(circuit.depth(), 0);

    let none = Circuit::new("really_empty");
    assert_eq!(none.depth(), 0);
}

#[test]
fn keep_ccx_survives_pipeline() {
    let mut circuit = Circuit::with_size("keep", 3, 0);
    circuit.ccx(QubitId(0), QubitId(1), QubitId(2)).unwrap();

    let config = PassConfig {
        keep_ccx: true,
        ..silent()
    };
    let out = Transpiler::new()
        .execute(circuit, sequences::TO_CLIFFORD_T_RZ, &config)
        .unwrap();
    assert_eq!(out.count_ops().get("ccx"), Some(&1));
}

#[test]
fn keep_cx_retains_cnots_in_pbc() {
    let mut circuit = Circuit::with_size("keep", 2, 0);
    circuit.cx(QubitId(0), QubitId(1)).unwrap();
    circuit.t(QubitId(1)).unwrap();

    let mut pass_circuit = circuit.clone();
    let modified = ToPbc::new(true).run(&mut pass_circuit).unwrap();
    assert!(modified);
    let counts = pass_circuit.count_ops();
    assert_eq!(counts.get("cx"), Some(&1));
    assert_eq!(counts.get("t_pauli"), Some(&1));
}
