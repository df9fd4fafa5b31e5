// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


//! Ways of generating random voter rankings, and some utility routines using pseudo-random numbers.


use std::collections::HashSet;
use std::fmt;
use std::fmt::Formatter;
use std::sync::Arc;
use rand::{Rng, RngCore};
use rand::seq::SliceRandom;
use crate::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use crate::errors::ElectionError;

/// Make a boolean array of length len such that num_true of them are true.
/// ```
/// use rand::rng;
/// use axioms::random_util::make_array_with_some_randomly_true;
/// let a4_10 = make_array_with_some_randomly_true(10,4,& mut rng());
/// assert_eq!(10,a4_10.len());
/// assert_eq!(4,a4_10.iter().filter(|v|**v).count());
/// let a7_10 = make_array_with_some_randomly_true(10,7,& mut rng());
/// assert_eq!(10,a7_10.len());
/// assert_eq!(7,a7_10.iter().filter(|v|**v).count());
/// ```
pub fn make_array_with_some_randomly_true<R:RngCore + ?Sized>(len:usize,num_true:usize,rng:&mut R) -> Vec<bool> {
    assert!(num_true<=len);
    let inverse = num_true>len/2;
    let mut res = vec![inverse;len];
    let mut togo = if inverse {len-num_true} else {num_true};
    while togo>0 {
        let pos = rng.random_range(0..len);
        if res[pos]==inverse { res[pos]=!inverse; togo-=1; }
    }
    res
}

/// Choose `num_to_choose` distinct alternatives out of the first `num_candidates`, each subset equally likely, in a uniformly random order.
pub fn random_subset_in_random_order<R:RngCore + ?Sized>(num_candidates:NumberOfCandidates,num_to_choose:usize,rng:&mut R) -> Vec<CandidateIndex> {
    let chosen = make_array_with_some_randomly_true(num_candidates.0,num_to_choose,rng);
    let mut res : Vec<CandidateIndex> = chosen.iter().enumerate().filter(|(_,c)|**c).map(|(i,_)|CandidateIndex(i)).collect();
    res.shuffle(rng);
    res
}

/// How many alternatives a voter ranks: uniformly 1 to K inclusive, or all K.
fn number_to_rank<R:RngCore + ?Sized>(num_candidates:NumberOfCandidates,rank_all:bool,rng:&mut R) -> usize {
    if rank_all { num_candidates.0 } else { rng.random_range(1..=num_candidates.0) }
}

/// A user supplied way of generating a ranking over the given number of alternatives.
/// It must only produce distinct alternatives less than the given number.
pub type CustomRankingFunction = Arc<dyn Fn(&mut dyn RngCore,NumberOfCandidates) -> Vec<CandidateIndex> + Send + Sync>;

/// How to generate a random voter's ranking.
#[derive(Clone)]
pub enum RankingGenerator {
    /// Rank a uniformly random number (1 to K) of uniformly chosen alternatives in uniformly random order.
    Uniform,
    /// A uniformly random permutation of all K alternatives.
    RankAll,
    /// Like Uniform (or RankAll) but members of a coalition are always ranked contiguously.
    Coalition(CoalitionStructure),
    Custom(CustomRankingFunction),
}

impl fmt::Debug for RankingGenerator {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RankingGenerator::Uniform => write!(f,"Uniform"),
            RankingGenerator::RankAll => write!(f,"RankAll"),
            RankingGenerator::Coalition(coalitions) => write!(f,"Coalition({:?})",coalitions),
            RankingGenerator::Custom(_) => write!(f,"Custom"),
        }
    }
}

impl RankingGenerator {
    /// Convenience for a coalition generator with the given coalition sizes.
    pub fn coalition(sizes:Vec<usize>,rank_all:bool) -> Result<Self,ElectionError> {
        Ok(RankingGenerator::Coalition(CoalitionStructure::new(sizes,rank_all)?))
    }

    /// Convenience for wrapping a closure as a custom generator.
    pub fn custom(f:impl Fn(&mut dyn RngCore,NumberOfCandidates) -> Vec<CandidateIndex> + Send + Sync + 'static) -> Self {
        RankingGenerator::Custom(Arc::new(f))
    }

    /// Check that this generator can make rankings over the given number of alternatives.
    pub fn check_compatible(&self,num_candidates:NumberOfCandidates) -> Result<(),ElectionError> {
        if num_candidates.0==0 { return Err(ElectionError::InvalidCandidateCount); }
        match self {
            RankingGenerator::Coalition(coalitions) if coalitions.num_candidates()!=num_candidates => {
                Err(ElectionError::InvalidParameters(format!("coalition sizes {:?} sum to {} but there are {} alternatives",coalitions.sizes(),coalitions.num_candidates(),num_candidates)))
            }
            _ => Ok(())
        }
    }

    /// Generate one voter's ranking over `num_candidates` alternatives.
    pub fn generate_rank<R:Rng>(&self,num_candidates:NumberOfCandidates,rng:&mut R) -> Result<Vec<CandidateIndex>,ElectionError> {
        self.check_compatible(num_candidates)?;
        Ok(match self {
            RankingGenerator::Uniform => random_subset_in_random_order(num_candidates,number_to_rank(num_candidates,false,rng),rng),
            RankingGenerator::RankAll => random_subset_in_random_order(num_candidates,num_candidates.0,rng),
            RankingGenerator::Coalition(coalitions) => coalitions.generate_rank(rng),
            RankingGenerator::Custom(f) => {
                let rng : &mut dyn RngCore = rng;
                let ranking = f(rng,num_candidates);
                let mut seen = HashSet::with_capacity(ranking.len());
                for &candidate in &ranking {
                    assert!(num_candidates.contains(candidate),"Custom ranking generator produced alternative {} with only {} alternatives",candidate,num_candidates);
                    assert!(seen.insert(candidate),"Custom ranking generator produced alternative {} more than once in {:?}",candidate,ranking);
                }
                ranking
            }
        })
    }
}

/// A fixed partition of the alternatives into coalitions, in order. With sizes 4,3,2,
/// coalition 0 is alternatives 0..4, coalition 1 is 4..7 and coalition 2 is 7..9.
///
/// A coalition voter ranks all the coalition members they rank consecutively. E.g. with sizes 2,3,
/// `1>2>3`, `0>3`, `2>3>0>1` and `3>4>2>1>0` are valid, but `0>4>1` and `2>1>3` are not.
#[derive(Clone,Debug,PartialEq,Eq)]
pub struct CoalitionStructure {
    sizes : Vec<usize>,
    /// coalition_of[i] is the coalition alternative i belongs to.
    coalition_of : Vec<usize>,
    rank_all : bool,
}

impl CoalitionStructure {
    pub fn new(sizes:Vec<usize>,rank_all:bool) -> Result<Self,ElectionError> {
        if sizes.is_empty() { return Err(ElectionError::InvalidParameters("need at least one coalition".to_string())); }
        if sizes.contains(&0) { return Err(ElectionError::InvalidParameters(format!("coalition sizes {:?} include an empty coalition",sizes))); }
        let mut coalition_of = Vec::with_capacity(sizes.iter().sum());
        for (coalition,&size) in sizes.iter().enumerate() {
            coalition_of.extend(std::iter::repeat_n(coalition,size));
        }
        Ok(CoalitionStructure{ sizes, coalition_of, rank_all })
    }

    pub fn sizes(&self) -> &[usize] { &self.sizes }
    pub fn num_coalitions(&self) -> usize { self.sizes.len() }
    pub fn num_candidates(&self) -> NumberOfCandidates { NumberOfCandidates(self.coalition_of.len()) }
    pub fn coalition_of(&self,candidate:CandidateIndex) -> usize { self.coalition_of[candidate.0] }

    /// Pick which alternatives to rank as for the uniform generator, then arrange them so
    /// each coalition is contiguous, with coalition order and order within each coalition shuffled.
    fn generate_rank<R:RngCore + ?Sized>(&self,rng:&mut R) -> Vec<CandidateIndex> {
        let num_candidates = self.num_candidates();
        let num_to_rank = number_to_rank(num_candidates,self.rank_all,rng);
        let chosen = make_array_with_some_randomly_true(num_candidates.0,num_to_rank,rng);
        let mut by_coalition : Vec<Vec<CandidateIndex>> = vec![vec![];self.sizes.len()];
        for (i,_) in chosen.iter().enumerate().filter(|(_,c)|**c) {
            by_coalition[self.coalition_of[i]].push(CandidateIndex(i));
        }
        let mut present : Vec<Vec<CandidateIndex>> = by_coalition.into_iter().filter(|members|!members.is_empty()).collect();
        for members in &mut present { members.shuffle(rng); }
        present.shuffle(rng);
        present.concat()
    }

    /// Whether the ranking keeps each coalition's ranked members together.
    /// ```
    /// use axioms::ballot_metadata::CandidateIndex;
    /// use axioms::random_util::CoalitionStructure;
    /// let coalitions = CoalitionStructure::new(vec![2,3],false).unwrap();
    /// let check = |s:&str| coalitions.is_contiguous(&s.split('>').map(|c|c.parse().unwrap()).collect::<Vec<CandidateIndex>>());
    /// assert!(check("1>2>3"));
    /// assert!(check("3>4>2>1>0"));
    /// assert!(!check("0>4>1"));
    /// assert!(!check("2>1>3"));
    /// ```
    pub fn is_contiguous(&self,ranking:&[CandidateIndex]) -> bool {
        let mut finished = vec![false;self.sizes.len()];
        let mut current : Option<usize> = None;
        for &candidate in ranking {
            let coalition = self.coalition_of(candidate);
            if current!=Some(coalition) {
                if finished[coalition] { return false; }
                if let Some(previous) = current { finished[previous]=true; }
                current=Some(coalition);
            }
        }
        true
    }
}
