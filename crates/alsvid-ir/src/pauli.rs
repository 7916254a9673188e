//! Signed multi-qubit Pauli words.
//!
//! A [`PauliWord`] is a tensor product `±p_0 ⊗ … ⊗ p_{n-1}` with each slot in
//! `{I, X, Y, Z}`. Words carry the algebra the PBC back-end runs on:
//! commutation checks, phase-tracked products, and conjugation by Clifford
//! gates and Pauli rotations.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{IrError, IrResult};

/// A single-qubit Pauli operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Pauli {
    /// Identity.
    I,
    /// Pauli-X.
    X,
    /// Pauli-Y.
    Y,
    /// Pauli-Z.
    Z,
}

impl Pauli {
    /// Construct from the symplectic (x, z) bit pair.
    #[inline]
    pub fn from_xz(x: bool, z: bool) -> Self {
        match (x, z) {
            (false, false) => Pauli::I,
            (true, false) => Pauli::X,
            (true, true) => Pauli::Y,
            (false, true) => Pauli::Z,
        }
    }

    /// The symplectic (x, z) bit pair.
    #[inline]
    pub fn xz(self) -> (bool, bool) {
        match self {
            Pauli::I => (false, false),
            Pauli::X => (true, false),
            Pauli::Y => (true, true),
            Pauli::Z => (false, true),
        }
    }

    /// Single-qubit product `self · rhs`, returned as `(result, k)` with the
    /// phase `i^k` (k in 0..4).
    #[inline]
    pub fn mul(self, rhs: Pauli) -> (Pauli, u8) {
        use Pauli::{I, X, Y, Z};
        match (self, rhs) {
            (I, p) | (p, I) => (p, 0),
            (X, X) | (Y, Y) | (Z, Z) => (I, 0),
            (X, Y) => (Z, 1),
            (Y, X) => (Z, 3),
            (Y, Z) => (X, 1),
            (Z, Y) => (X, 3),
            (Z, X) => (Y, 1),
            (X, Z) => (Y, 3),
        }
    }

    /// Whether two single-qubit Paulis commute.
    #[inline]
    pub fn commutes(self, rhs: Pauli) -> bool {
        self == Pauli::I || rhs == Pauli::I || self == rhs
    }

    /// The character used in text form.
    pub fn to_char(self) -> char {
        match self {
            Pauli::I => 'I',
            Pauli::X => 'X',
            Pauli::Y => 'Y',
            Pauli::Z => 'Z',
        }
    }

    /// Parse a single character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'I' => Some(Pauli::I),
            'X' => Some(Pauli::X),
            'Y' => Some(Pauli::Y),
            'Z' => Some(Pauli::Z),
            _ => None,
        }
    }
}

/// A signed Pauli word over all qubits of a circuit.
///
/// Slot 0 is qubit 0; the text form reads left to right from qubit 0
/// (`+XIZ` is X on qubit 0, Z on qubit 2).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PauliWord {
    slots: Vec<Pauli>,
    negative: bool,
}

impl PauliWord {
    /// The identity word on `n` qubits.
    pub fn identity(n: usize) -> Self {
        Self {
            slots: vec![Pauli::I; n],
            negative: false,
        }
    }

    /// A word with a single non-identity slot.
    pub fn single(n: usize, qubit: usize, pauli: Pauli) -> Self {
        let mut word = Self::identity(n);
        word.slots[qubit] = pauli;
        word
    }

    /// Build from slots and a sign.
    pub fn new(slots: Vec<Pauli>, negative: bool) -> Self {
        Self { slots, negative }
    }

    /// Parse the canonical text form: an optional sign followed by one
    /// character per qubit out of `IXYZ`. A missing sign means positive.
    pub fn parse(s: &str) -> IrResult<Self> {
        let (negative, body) = match s.chars().next() {
            Some('+') => (false, &s[1..]),
            Some('-') => (true, &s[1..]),
            _ => (false, s),
        };
        if body.is_empty() {
            return Err(IrError::MalformedPauli(s.to_string()));
        }
        let slots = body
            .chars()
            .map(|c| Pauli::from_char(c).ok_or_else(|| IrError::MalformedPauli(s.to_string())))
            .collect::<IrResult<Vec<_>>>()?;
        Ok(Self { slots, negative })
    }

    /// Number of qubits the word spans.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the word spans zero qubits.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Whether every slot is the identity.
    pub fn is_identity(&self) -> bool {
        self.slots.iter().all(|&p| p == Pauli::I)
    }

    /// Number of non-identity slots.
    pub fn weight(&self) -> usize {
        self.slots.iter().filter(|&&p| p != Pauli::I).count()
    }

    /// The sign of the word.
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Flip the sign.
    pub fn negate(&mut self) {
        self.negative = !self.negative;
    }

    /// A copy with the sign flipped.
    pub fn negated(&self) -> Self {
        let mut w = self.clone();
        w.negate();
        w
    }

    /// The Pauli at the given slot.
    #[inline]
    pub fn get(&self, qubit: usize) -> Pauli {
        self.slots[qubit]
    }

    /// Set the Pauli at the given slot.
    #[inline]
    pub fn set(&mut self, qubit: usize, pauli: Pauli) {
        self.slots[qubit] = pauli;
    }

    /// Iterator over the indices of non-identity slots.
    pub fn support(&self) -> impl Iterator<Item = usize> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, &p)| p != Pauli::I)
            .map(|(q, _)| q)
    }

    /// Whether the words are equal ignoring the sign.
    pub fn same_axis(&self, other: &PauliWord) -> bool {
        self.slots == other.slots
    }

    /// Whether two words commute as operators.
    pub fn commutes_with(&self, other: &PauliWord) -> bool {
        debug_assert_eq!(self.len(), other.len());
        let anti = self
            .slots
            .iter()
            .zip(&other.slots)
            .filter(|(&a, &b)| !a.commutes(b))
            .count();
        anti % 2 == 0
    }

    /// Phase-tracked product `self · other`.
    ///
    /// Returns the slot product with sign `sign(self) ^ sign(other)` plus the
    /// accumulated slotwise phase `i^k`. The caller folds `k` into the sign;
    /// for commuting words `k` is even, so the result is a real signed word.
    pub fn mul(&self, other: &PauliWord) -> (PauliWord, u8) {
        debug_assert_eq!(self.len(), other.len());
        let mut phase = 0u8;
        let slots = self
            .slots
            .iter()
            .zip(&other.slots)
            .map(|(&a, &b)| {
                let (p, k) = a.mul(b);
                phase = (phase + k) % 4;
                p
            })
            .collect();
        (
            PauliWord {
                slots,
                negative: self.negative ^ other.negative,
            },
            phase,
        )
    }

    /// Conjugation by a π/4 Pauli rotation about `axis` (an `s_pauli`):
    /// `e^{iπ/4 Q} · P · e^{-iπ/4 Q}`.
    ///
    /// Leaves the word unchanged when it commutes with the axis; otherwise
    /// the result is `i·Q·P`, a real signed word.
    pub fn conjugated_by_quarter(&self, axis: &PauliWord) -> PauliWord {
        if self.commutes_with(axis) {
            return self.clone();
        }
        let (mut word, k) = axis.mul(self);
        // i · i^k with k odd: the total power is even, so the phase is ±1.
        debug_assert!(k % 2 == 1);
        if (k + 1) % 4 == 2 {
            word.negate();
        }
        word
    }

    /// Conjugation by a π Pauli rotation about `axis` (a `z_pauli`):
    /// `Q · P · Q`, which flips the sign exactly when the words anticommute.
    pub fn conjugated_by_half(&self, axis: &PauliWord) -> PauliWord {
        if self.commutes_with(axis) {
            self.clone()
        } else {
            self.negated()
        }
    }

    // Word-side Clifford conjugations, `P ← U P U†`. These are the textbook
    // stabilizer-update rules; the tableau and the Pauli-removal pass both
    // run on them.

    /// Conjugate by H on `q`: X↔Z, Y→−Y.
    pub fn conjugate_h(&mut self, q: usize) {
        match self.slots[q] {
            Pauli::X => self.slots[q] = Pauli::Z,
            Pauli::Z => self.slots[q] = Pauli::X,
            Pauli::Y => self.negate(),
            Pauli::I => {}
        }
    }

    /// Conjugate by S on `q`: X→Y, Y→−X.
    pub fn conjugate_s(&mut self, q: usize) {
        match self.slots[q] {
            Pauli::X => self.slots[q] = Pauli::Y,
            Pauli::Y => {
                self.slots[q] = Pauli::X;
                self.negate();
            }
            _ => {}
        }
    }

    /// Conjugate by S† on `q`: X→−Y, Y→X.
    pub fn conjugate_sdg(&mut self, q: usize) {
        match self.slots[q] {
            Pauli::X => {
                self.slots[q] = Pauli::Y;
                self.negate();
            }
            Pauli::Y => self.slots[q] = Pauli::X,
            _ => {}
        }
    }

    /// Conjugate by X on `q`: Y→−Y, Z→−Z.
    pub fn conjugate_x(&mut self, q: usize) {
        if matches!(self.slots[q], Pauli::Y | Pauli::Z) {
            self.negate();
        }
    }

    /// Conjugate by Y on `q`: X→−X, Z→−Z.
    pub fn conjugate_y(&mut self, q: usize) {
        if matches!(self.slots[q], Pauli::X | Pauli::Z) {
            self.negate();
        }
    }

    /// Conjugate by Z on `q`: X→−X, Y→−Y.
    pub fn conjugate_z(&mut self, q: usize) {
        if matches!(self.slots[q], Pauli::X | Pauli::Y) {
            self.negate();
        }
    }

    /// Conjugate by CX with control `c` and target `t`.
    pub fn conjugate_cx(&mut self, c: usize, t: usize) {
        let (xc, zc) = self.slots[c].xz();
        let (xt, zt) = self.slots[t].xz();
        if xc && zt && !(xt ^ zc) {
            self.negate();
        }
        self.slots[t] = Pauli::from_xz(xt ^ xc, zt);
        self.slots[c] = Pauli::from_xz(xc, zc ^ zt);
    }

    /// Conjugate by CZ on `a` and `b`.
    pub fn conjugate_cz(&mut self, a: usize, b: usize) {
        let (xa, za) = self.slots[a].xz();
        let (xb, zb) = self.slots[b].xz();
        if xa && xb && (za ^ zb) {
            self.negate();
        }
        self.slots[a] = Pauli::from_xz(xa, za ^ xb);
        self.slots[b] = Pauli::from_xz(xb, zb ^ xa);
    }

    /// Conjugate by SWAP on `a` and `b`.
    pub fn conjugate_swap(&mut self, a: usize, b: usize) {
        self.slots.swap(a, b);
    }
}

impl fmt::Display for PauliWord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", if self.negative { '-' } else { '+' })?;
        for p in &self.slots {
            write!(f, "{}", p.to_char())?;
        }
        Ok(())
    }
}

impl std::str::FromStr for PauliWord {
    type Err = IrError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let w = PauliWord::parse("+XIZ").unwrap();
        assert_eq!(w.len(), 3);
        assert_eq!(w.get(0), Pauli::X);
        assert_eq!(w.get(1), Pauli::I);
        assert_eq!(w.get(2), Pauli::Z);
        assert!(!w.is_negative());
        assert_eq!(format!("{w}"), "+XIZ");

        let neg = PauliWord::parse("-ZZ").unwrap();
        assert!(neg.is_negative());
        assert_eq!(format!("{neg}"), "-ZZ");

        // Bare words are positive.
        assert!(!PauliWord::parse("XY").unwrap().is_negative());
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(PauliWord::parse("+XQZ").is_err());
        assert!(PauliWord::parse("").is_err());
        assert!(PauliWord::parse("-").is_err());
    }

    #[test]
    fn test_commutation() {
        let xx = PauliWord::parse("XX").unwrap();
        let zz = PauliWord::parse("ZZ").unwrap();
        let zi = PauliWord::parse("ZI").unwrap();
        // Two anticommuting slots cancel out.
        assert!(xx.commutes_with(&zz));
        // One anticommuting slot does not.
        assert!(!xx.commutes_with(&zi));
    }

    #[test]
    fn test_product_phases() {
        // X·Z = -iY, so i·X·Z = Y with no residual sign.
        let x = PauliWord::parse("X").unwrap();
        let z = PauliWord::parse("Z").unwrap();
        let conj = z.conjugated_by_quarter(&x);
        assert_eq!(conj, PauliWord::parse("Y").unwrap());

        // Z·X = iY, so i·Z·X = -Y.
        let conj = x.conjugated_by_quarter(&z);
        assert_eq!(conj, PauliWord::parse("-Y").unwrap());
    }

    #[test]
    fn test_quarter_conjugation_commuting_is_noop() {
        let zz = PauliWord::parse("ZZ").unwrap();
        let xx = PauliWord::parse("XX").unwrap();
        assert_eq!(zz.conjugated_by_quarter(&xx), zz);
    }

    #[test]
    fn test_half_conjugation() {
        let x = PauliWord::parse("XI").unwrap();
        let z = PauliWord::parse("ZI").unwrap();
        assert_eq!(x.conjugated_by_half(&z), PauliWord::parse("-XI").unwrap());
        assert_eq!(
            x.conjugated_by_half(&PauliWord::parse("XI").unwrap()),
            x
        );
    }

    #[test]
    fn test_conjugate_h() {
        let mut w = PauliWord::parse("XIZ").unwrap();
        w.conjugate_h(0);
        w.conjugate_h(2);
        assert_eq!(w, PauliWord::parse("ZIX").unwrap());

        let mut y = PauliWord::parse("Y").unwrap();
        y.conjugate_h(0);
        assert_eq!(y, PauliWord::parse("-Y").unwrap());
    }

    #[test]
    fn test_conjugate_s_inverse_pair() {
        let mut w = PauliWord::parse("X").unwrap();
        w.conjugate_s(0);
        assert_eq!(w, PauliWord::parse("Y").unwrap());
        w.conjugate_sdg(0);
        assert_eq!(w, PauliWord::parse("X").unwrap());
    }

    #[test]
    fn test_conjugate_cx() {
        // X on the control spreads to the target.
        let mut w = PauliWord::parse("XI").unwrap();
        w.conjugate_cx(0, 1);
        assert_eq!(w, PauliWord::parse("XX").unwrap());

        // Z on the target spreads to the control.
        let mut w = PauliWord::parse("IZ").unwrap();
        w.conjugate_cx(0, 1);
        assert_eq!(w, PauliWord::parse("ZZ").unwrap());

        // Y⊗Y picks up a sign: CX(Y⊗Y)CX = -X⊗Z.
        let mut w = PauliWord::parse("YY").unwrap();
        w.conjugate_cx(0, 1);
        assert_eq!(w, PauliWord::parse("-XZ").unwrap());
    }

    #[test]
    fn test_conjugate_cz() {
        let mut w = PauliWord::parse("XI").unwrap();
        w.conjugate_cz(0, 1);
        assert_eq!(w, PauliWord::parse("XZ").unwrap());

        let mut w = PauliWord::parse("XX").unwrap();
        w.conjugate_cz(0, 1);
        assert_eq!(w, PauliWord::parse("YY").unwrap());
    }

    #[test]
    fn test_support_and_weight() {
        let w = PauliWord::parse("XIIZ").unwrap();
        assert_eq!(w.support().collect::<Vec<_>>(), vec![0, 3]);
        assert_eq!(w.weight(), 2);
        assert!(!w.is_identity());
        assert!(PauliWord::identity(4).is_identity());
    }
}
