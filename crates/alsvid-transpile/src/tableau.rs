//! Clifford tableau for the PBC back-end.
//!
//! The tableau tracks the running Clifford prefix as its action on the
//! Pauli group generators: one signed [`PauliWord`] row per `X_i` and `Z_i`,
//! updated with the standard stabilizer-update rules as gates are absorbed.

use alsvid_ir::{Pauli, PauliWord, QubitId, StandardGate};

/// A Clifford operator represented by its action on `X_i` and `Z_i`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tableau {
    x_rows: Vec<PauliWord>,
    z_rows: Vec<PauliWord>,
}

impl Tableau {
    /// The identity tableau on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            x_rows: (0..n).map(|q| PauliWord::single(n, q, Pauli::X)).collect(),
            z_rows: (0..n).map(|q| PauliWord::single(n, q, Pauli::Z)).collect(),
        }
    }

    /// Number of qubits.
    pub fn num_qubits(&self) -> usize {
        self.x_rows.len()
    }

    /// The image of `X_q` under the tracked Clifford.
    pub fn x_row(&self, q: usize) -> &PauliWord {
        &self.x_rows[q]
    }

    /// The image of `Z_q` under the tracked Clifford.
    pub fn z_row(&self, q: usize) -> &PauliWord {
        &self.z_rows[q]
    }

    /// Whether the tableau is the identity.
    pub fn is_identity(&self) -> bool {
        *self == Self::identity(self.num_qubits())
    }

    fn rows_mut(&mut self) -> impl Iterator<Item = &mut PauliWord> + '_ {
        self.x_rows.iter_mut().chain(self.z_rows.iter_mut())
    }

    /// Absorb a Clifford gate. Returns `false` if the gate is not in the
    /// supported Clifford set (the tableau is then unchanged).
    pub fn apply_gate(&mut self, gate: StandardGate, qubits: &[QubitId]) -> bool {
        match gate {
            StandardGate::I => {}
            StandardGate::H => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_h(q));
            }
            StandardGate::S => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_s(q));
            }
            StandardGate::Sdg => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_sdg(q));
            }
            StandardGate::X => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_x(q));
            }
            StandardGate::Y => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_y(q));
            }
            StandardGate::Z => {
                let q = qubits[0].index();
                self.rows_mut().for_each(|row| row.conjugate_z(q));
            }
            StandardGate::CX => {
                let (c, t) = (qubits[0].index(), qubits[1].index());
                self.rows_mut().for_each(|row| row.conjugate_cx(c, t));
            }
            StandardGate::CZ => {
                let (a, b) = (qubits[0].index(), qubits[1].index());
                self.rows_mut().for_each(|row| row.conjugate_cz(a, b));
            }
            StandardGate::Swap => {
                let (a, b) = (qubits[0].index(), qubits[1].index());
                self.rows_mut().for_each(|row| row.conjugate_swap(a, b));
            }
            _ => return false,
        }
        true
    }

    /// Express the tableau as a CX circuit, if possible.
    ///
    /// Succeeds when the tableau is CNOT-expressible: every `X_i` image is a
    /// positive product of X's and every `Z_i` image a positive product of
    /// Z's. The returned `(control, target)` list, applied in order to the
    /// identity, reproduces this tableau exactly (verified by replay).
    pub fn as_cx_circuit(&self) -> Option<Vec<(u32, u32)>> {
        let n = self.num_qubits();
        for row in &self.x_rows {
            if row.is_negative() || (0..n).any(|q| matches!(row.get(q), Pauli::Y | Pauli::Z)) {
                return None;
            }
        }
        for row in &self.z_rows {
            if row.is_negative() || (0..n).any(|q| matches!(row.get(q), Pauli::Y | Pauli::X)) {
                return None;
            }
        }

        // B[i][j] = whether X_j appears in the image of X_i, transposed so
        // that appending CX(c, t) is the row operation B[t] ^= B[c].
        let mut b = vec![vec![false; n]; n];
        for (i, row) in self.x_rows.iter().enumerate() {
            for j in 0..n {
                b[j][i] = row.get(j) == Pauli::X;
            }
        }

        // Gauss-Jordan with row additions only; emitting the recorded ops in
        // reverse rebuilds the matrix from the identity.
        let mut recorded: Vec<(u32, u32)> = vec![];
        for i in 0..n {
            if !b[i][i] {
                let j = (0..n).find(|&j| j != i && b[j][i])?;
                for k in 0..n {
                    let v = b[j][k];
                    b[i][k] ^= v;
                }
                recorded.push((u32::try_from(j).ok()?, u32::try_from(i).ok()?));
            }
            for j in 0..n {
                if j != i && b[j][i] {
                    for k in 0..n {
                        let v = b[i][k];
                        b[j][k] ^= v;
                    }
                    recorded.push((u32::try_from(i).ok()?, u32::try_from(j).ok()?));
                }
            }
        }
        if b.iter().enumerate().any(|(i, row)| {
            row.iter().enumerate().any(|(j, &v)| v != (i == j))
        }) {
            return None;
        }
        recorded.reverse();

        // Replay to confirm the synthesis matches, Z block and all.
        let mut check = Tableau::identity(n);
        for &(c, t) in &recorded {
            check.apply_gate(StandardGate::CX, &[QubitId(c), QubitId(t)]);
        }
        (check == *self).then_some(recorded)
    }
}
