// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.

//! Things that can go wrong when setting up or counting an election.
//!
//! Note that a voting rule failing an axiom is not an error; it is the result being looked for.
//! Malformed ballots (alternatives out of range or repeated) are bugs in the caller and panic.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ElectionError {
    #[error("Can not rank or count with zero alternatives")]
    InvalidCandidateCount,
    #[error("Invalid election parameters : {0}")]
    InvalidParameters(String),
}
