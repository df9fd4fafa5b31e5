// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.

//! Evaluate single winner voting rules on ranked ballots, and check them against
//! social choice axioms such as independence of irrelevant alternatives and unanimity.
//!
//! ```
//! use axioms::ballot_metadata::NumberOfCandidates;
//! use axioms::ballot_paper::Ballot;
//! use axioms::electorate::Electorate;
//! use axioms::rules::VotingRule;
//! use axioms::axiom::{check_iia, check_unanimity};
//! let ballots : Vec<Ballot> = ["0>1>2","0>1>2","0>1>2","1>0>2","1>0>2","2>1>0","2>1>0"].iter().map(|b|b.parse().unwrap()).collect();
//! let electorate = Electorate::from_ballots(ballots,NumberOfCandidates(3)).unwrap();
//! // 2 is a spoiler for 1 under first past the post.
//! assert!(!check_iia(&electorate,&VotingRule::plurality(),true).unwrap());
//! assert!(check_unanimity(&VotingRule::plurality(),&electorate).unwrap());
//! ```

pub mod ballot_metadata;
pub mod ballot_paper;
pub mod errors;
pub mod random_util;
pub mod electorate;
pub mod rules;
pub mod axiom;
