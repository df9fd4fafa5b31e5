// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


//! Check whether a social choice function satisfies an axiom on a particular electorate.
//!
//! A check returning `Ok(false)` is a normal outcome, meaning the axiom was violated.
//! `Err` means the electorate or rule could not be evaluated at all.

use std::fmt;
use std::fmt::{Display, Formatter};
use std::str::FromStr;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::ballot_metadata::CandidateIndex;
use crate::ballot_paper::Preference;
use crate::electorate::{simplify, Electorate};
use crate::errors::ElectionError;
use crate::rules::{SocialChoiceFunction, SocietalRanking};

/// The axioms that can be checked.
#[derive(Copy,Clone,Debug,PartialEq,Eq,Hash,Serialize,Deserialize)]
#[serde(try_from="String",into="String")]
pub enum Axiom {
    /// Removing alternatives should not change the relative societal order of the rest.
    /// If `winner_only`, only check that the winner still wins whenever it is not removed.
    IndependenceOfIrrelevantAlternatives{ winner_only : bool },
    /// If every voter prefers x to y, society should not rank y above x.
    Unanimity,
}

impl Axiom {
    pub fn check<F:SocialChoiceFunction+?Sized>(self,electorate:&Electorate,rule:&F) -> Result<bool,ElectionError> {
        match self {
            Axiom::IndependenceOfIrrelevantAlternatives { winner_only } => check_iia(electorate,rule,winner_only),
            Axiom::Unanimity => check_unanimity(rule,electorate),
        }
    }
}

impl Display for Axiom {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true } => "IIA",
            Axiom::IndependenceOfIrrelevantAlternatives { winner_only: false } => "IIAFullRanking",
            Axiom::Unanimity => "Unanimity",
        })
    }
}

impl FromStr for Axiom {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "IIA" => Ok(Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true }),
            "IIAFullRanking" => Ok(Axiom::IndependenceOfIrrelevantAlternatives { winner_only: false }),
            "Unanimity" => Ok(Axiom::Unanimity),
            _ => Err(format!("No such axiom {}. Supported are IIA, IIAFullRanking and Unanimity",s)),
        }
    }
}

impl TryFrom<String> for Axiom {
    type Error = String;
    fn try_from(value: String) -> Result<Self, Self::Error> { value.parse() }
}

impl From<Axiom> for String {
    fn from(value: Axiom) -> Self { value.to_string() }
}

/// Evidence that a rule does not satisfy independence of irrelevant alternatives.
#[derive(Clone,Debug,PartialEq,Eq,Serialize)]
pub struct IIAViolation {
    /// the rule's result on all the alternatives.
    pub full_ranking : SocietalRanking,
    /// the alternatives kept.
    pub subset : Vec<CandidateIndex>,
    /// the rule's result when only `subset` was available.
    pub restricted_ranking : SocietalRanking,
}

impl Display for IIAViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,"Ranking with all was {:?}, but the ranking with only the alternatives {:?} is {:?}",self.full_ranking,self.subset,self.restricted_ranking)
    }
}

/// Evidence that a rule does not satisfy unanimity.
#[derive(Clone,Debug,PartialEq,Eq,Serialize)]
pub struct UnanimityViolation {
    pub societal_ranking : SocietalRanking,
    /// every voter preferred this...
    pub unanimously_preferred : CandidateIndex,
    /// ...to this, but society ranked this higher.
    pub society_preferred : CandidateIndex,
}

impl Display for UnanimityViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f,"Everyone preferred {} over {} but society chose {:?}",self.unanimously_preferred,self.society_preferred,self.societal_ranking)
    }
}

/// Whether the result on a subset is consistent with the result on all alternatives.
///
/// If `winner_only`, just the winners are compared. Otherwise `restricted` must be exactly `full`
/// with the alternatives not in `subset` deleted.
/// ```
/// use axioms::axiom::maintains_order;
/// use axioms::ballot_metadata::CandidateIndex;
/// let c = |v:&[usize]| v.iter().map(|&i|CandidateIndex(i)).collect::<Vec<_>>();
/// assert!(maintains_order(&c(&[2,0]),&c(&[2,1,0]),&c(&[0,2]),false));
/// assert!(!maintains_order(&c(&[0,2]),&c(&[2,1,0]),&c(&[0,2]),false));
/// assert!(maintains_order(&c(&[2]),&c(&[2,1,0]),&c(&[0,2]),true));
/// ```
pub fn maintains_order(restricted:&[CandidateIndex],full:&[CandidateIndex],subset:&[CandidateIndex],winner_only:bool) -> bool {
    if winner_only {
        restricted.first()==full.first()
    } else {
        restricted.iter().eq(full.iter().filter(|c|subset.contains(c)))
    }
}

/// Look for a subset of the alternatives on which the rule's result is inconsistent with its result on all alternatives.
///
/// If `winner_only`, only subsets containing the overall winner are tried, and only the winner is compared.
/// Stops at the first violation found.
pub fn find_iia_violation<F:SocialChoiceFunction+?Sized>(electorate:&Electorate,rule:&F,winner_only:bool) -> Result<Option<IIAViolation>,ElectionError> {
    let full_ranking = rule.evaluate(electorate.ballots(),&electorate.all_candidates())?;
    let winner = *full_ranking.first().expect("A social choice function returned an empty ranking");
    for subset in electorate.restriction_subsets()? {
        if winner_only && !subset.contains(&winner) { continue; }
        let restricted_ranking = rule.evaluate(&simplify(electorate.ballots(),subset),subset)?;
        if !maintains_order(&restricted_ranking,&full_ranking,subset,winner_only) {
            let violation = IIAViolation{ full_ranking, subset: subset.clone(), restricted_ranking };
            debug!("{} failed IIA: {}",rule.name(),violation);
            return Ok(Some(violation));
        }
    }
    Ok(None)
}

/// Whether the rule satisfies independence of irrelevant alternatives on this electorate.
pub fn check_iia<F:SocialChoiceFunction+?Sized>(electorate:&Electorate,rule:&F,winner_only:bool) -> Result<bool,ElectionError> {
    Ok(find_iia_violation(electorate,rule,winner_only)?.is_none())
}

/// Whether `ranking` contains both a and b, with a first.
fn ranks_above(ranking:&[CandidateIndex],a:CandidateIndex,b:CandidateIndex) -> bool {
    match (ranking.iter().position(|&c|c==a),ranking.iter().position(|&c|c==b)) {
        (Some(pos_a),Some(pos_b)) => pos_a<pos_b,
        _ => false,
    }
}

/// Look for a pair x,y where every voter prefers x to y but society ranks y above x.
///
/// Pairs not both present in the societal ranking (e.g. for a winner only rule) are not considered.
/// An electorate with no voters has no unanimous preferences, so always passes. This is deliberately
/// not the vacuous reading where every pair is unanimously preferred both ways.
pub fn find_unanimity_violation<F:SocialChoiceFunction+?Sized>(rule:&F,electorate:&Electorate) -> Result<Option<UnanimityViolation>,ElectionError> {
    let societal_ranking = rule.evaluate(electorate.ballots(),&electorate.all_candidates())?;
    if electorate.ballots().is_empty() { return Ok(None); }
    for (x,y) in electorate.pairs() {
        for (higher,lower) in [(x,y),(y,x)] {
            if ranks_above(&societal_ranking,higher,lower) && electorate.ballots().iter().all(|ballot|ballot.prefers(lower,higher)==Preference::Prefers(lower)) {
                let violation = UnanimityViolation{ societal_ranking, unanimously_preferred: lower, society_preferred: higher };
                debug!("{} failed unanimity: {}",rule.name(),violation);
                return Ok(Some(violation));
            }
        }
    }
    Ok(None)
}

/// Whether the rule satisfies unanimity on this electorate.
pub fn check_unanimity<F:SocialChoiceFunction+?Sized>(rule:&F,electorate:&Electorate) -> Result<bool,ElectionError> {
    Ok(find_unanimity_violation(rule,electorate)?.is_none())
}
