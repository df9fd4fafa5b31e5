// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.

//! Information about the alternatives in a contest.

use serde::{Serialize,Deserialize};
use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

/// an alternative (candidate), referred to by its index, 0 being first
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateIndex(pub usize);
// type alias really, don't want long display
impl fmt::Display for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}
// type alias really, don't want long display
impl fmt::Debug for CandidateIndex {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "#{}", self.0) }
}

impl FromStr for CandidateIndex {
    type Err = ParseIntError;
    fn from_str(s: &str) -> Result<Self, Self::Err> { Ok(CandidateIndex(s.parse()?)) }
}

/// The number of alternatives in a contest, often called K. The alternatives are CandidateIndex(0) to CandidateIndex(K-1).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Debug)]
#[serde(transparent)]
pub struct NumberOfCandidates(pub usize);

impl fmt::Display for NumberOfCandidates {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result { write!(f, "{}", self.0) }
}

impl NumberOfCandidates {
    /// All the alternatives, in ascending order.
    /// ```
    /// use axioms::ballot_metadata::{CandidateIndex, NumberOfCandidates};
    /// assert_eq!(NumberOfCandidates(3).all(),vec![CandidateIndex(0),CandidateIndex(1),CandidateIndex(2)]);
    /// assert!(NumberOfCandidates(0).all().is_empty());
    /// ```
    pub fn all(self) -> Vec<CandidateIndex> { (0..self.0).map(CandidateIndex).collect() }

    /// whether the candidate is one of the alternatives.
    pub fn contains(self,candidate:CandidateIndex) -> bool { candidate.0<self.0 }
}
