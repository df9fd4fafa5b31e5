// Copyright 2026 Andrew Conway.
// This file is part of ConcreteAxioms.
// ConcreteAxioms is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later version.
// ConcreteAxioms is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License along with ConcreteAxioms.  If not, see <https://www.gnu.org/licenses/>.


use std::cell::Cell;
use axioms::axiom::{check_iia, check_unanimity, find_iia_violation, find_unanimity_violation, maintains_order, Axiom, UnanimityViolation};
use axioms::ballot_metadata::{CandidateIndex, NumberOfCandidates};
use axioms::ballot_paper::Ballot;
use axioms::electorate::{simplify, Electorate};
use axioms::random_util::RankingGenerator;
use axioms::rules::{BordaWeight, FnRule, SocialChoiceFunction, SocietalRanking, VotingRule};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

fn electorate(votes:&[&str],num_candidates:usize) -> Electorate {
    Electorate::from_ballots(votes.iter().map(|v|v.parse().unwrap()).collect(),NumberOfCandidates(num_candidates)).unwrap()
}
fn c(v:&[usize]) -> Vec<CandidateIndex> { v.iter().map(|&i|CandidateIndex(i)).collect() }

/// The first voter decides. Alternatives they didn't rank go last, in ascending order.
fn dictator(ballots:&[Ballot],candidates:&[CandidateIndex]) -> SocietalRanking {
    let mut res : SocietalRanking = ballots[0].ranking().iter().copied().filter(|c|candidates.contains(c)).collect();
    let mut unranked : Vec<CandidateIndex> = candidates.iter().copied().filter(|c|!res.contains(c)).collect();
    unranked.sort();
    res.extend(unranked);
    res
}

#[test]
fn test_plurality_spoiler_fails_iia() {
    let e = electorate(&["0>1>2","0>1>2","0>1>2","1>0>2","1>0>2","2>1>0","2>1>0"],3);
    let violation = find_iia_violation(&e,&VotingRule::plurality(),true).unwrap().unwrap();
    assert_eq!(violation.full_ranking,c(&[0,1,2]));
    assert_eq!(violation.subset,c(&[0,1]));
    assert_eq!(violation.restricted_ranking,c(&[1,0]));
    assert!(violation.to_string().contains("only the alternatives"));
    assert!(!check_iia(&e,&VotingRule::plurality(),false).unwrap());
    // instant runoff elects 1 and keeps electing 1 whenever 1 is available.
    assert!(check_iia(&e,&VotingRule::instant_runoff(),true).unwrap());
}

#[test]
fn test_borda_fails_iia() {
    let e = electorate(&["0>1>2","0>1>2","0>1>2","1>2>0","1>2>0"],3);
    let borda = VotingRule::borda(BordaWeight::Linear);
    assert_eq!(borda.evaluate(e.ballots(),&e.all_candidates()).unwrap(),c(&[1,0,2]));
    let violation = find_iia_violation(&e,&borda,false).unwrap().unwrap();
    assert_eq!(violation.subset,c(&[0,1]));
    assert_eq!(violation.restricted_ranking,c(&[0,1]));
    assert!(!check_iia(&e,&borda,true).unwrap());
    assert!(!Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true }.check(&e,&borda).unwrap());
}

#[test]
fn test_two_alternatives_have_nothing_to_check_for_iia() {
    let e = electorate(&["0>1","1"],2);
    for winner_only in [true,false] {
        assert!(check_iia(&e,&VotingRule::plurality(),winner_only).unwrap());
    }
}

#[test]
fn test_iia_only_checks_subsets_containing_winner_and_stops_at_first_failure() {
    let e = electorate(&["0>1>2>3"],4);
    let calls = Cell::new(0);
    let ascending = FnRule::new("ascending",|_:&[Ballot],candidates:&[CandidateIndex]|->SocietalRanking {
        calls.set(calls.get()+1);
        let mut res = candidates.to_vec();
        res.sort();
        res
    });
    assert!(check_iia(&e,&ascending,true).unwrap());
    // the full evaluation, then 3 pairs and 3 triples containing 0.
    assert_eq!(calls.get(),7);
    calls.set(0);
    assert!(check_iia(&e,&ascending,false).unwrap());
    assert_eq!(calls.get(),11);

    let calls = Cell::new(0);
    let inconsistent = FnRule::new("inconsistent",|_:&[Ballot],candidates:&[CandidateIndex]|->SocietalRanking {
        calls.set(calls.get()+1);
        let mut res = candidates.to_vec();
        res.sort();
        if candidates.len()<4 { res.reverse(); }
        res
    });
    assert!(!check_iia(&e,&inconsistent,false).unwrap());
    assert_eq!(calls.get(),2);
}

#[test]
fn test_dictatorship_satisfies_both_axioms() {
    let rule = FnRule::new("dictator",dictator);
    let mut rng = ChaCha20Rng::seed_from_u64(30);
    for _ in 0..20 {
        let e = Electorate::new(15,NumberOfCandidates(5),&RankingGenerator::Uniform,&mut rng).unwrap();
        assert!(check_iia(&e,&rule,false).unwrap());
        assert!(check_iia(&e,&rule,true).unwrap());
        assert!(check_unanimity(&rule,&e).unwrap());
    }
}

/// When IIA passes, every subset's ranking really is the full ranking with the other alternatives deleted.
#[test]
fn test_iia_pass_means_consistent_on_every_subset() {
    let mut rng = ChaCha20Rng::seed_from_u64(31);
    let rules = [VotingRule::plurality(),VotingRule::borda(BordaWeight::Linear),VotingRule::borda(BordaWeight::Tournament),VotingRule::borda(BordaWeight::Dowdall)];
    let mut passes = 0;
    let mut failures = 0;
    for i in 0..40 {
        // few voters, so IIA sometimes holds. With 1 voter, Borda always satisfies it.
        let e = Electorate::new(1+i%3,NumberOfCandidates(4),&RankingGenerator::Uniform,&mut rng).unwrap();
        let all = e.all_candidates();
        for rule in &rules {
            let full = rule.evaluate(e.ballots(),&all).unwrap();
            match find_iia_violation(&e,rule,false).unwrap() {
                None => {
                    passes+=1;
                    for subset in e.restriction_subsets().unwrap() {
                        let restricted = rule.evaluate(&simplify(e.ballots(),subset),subset).unwrap();
                        let expected : Vec<CandidateIndex> = full.iter().copied().filter(|c|subset.contains(c)).collect();
                        assert_eq!(restricted,expected);
                    }
                }
                Some(violation) => {
                    failures+=1;
                    assert_eq!(violation.full_ranking,full);
                    assert!(!maintains_order(&violation.restricted_ranking,&full,&violation.subset,false));
                }
            }
        }
    }
    assert!(passes>0);
    assert!(failures>0);
}

#[test]
fn test_unanimity_violation_detected() {
    // everyone prefers 1 to 0, but society puts 0 first.
    let e = electorate(&["1>0","1"],2);
    let ascending = FnRule::new("ascending",|_:&[Ballot],candidates:&[CandidateIndex]|->SocietalRanking { let mut res = candidates.to_vec(); res.sort(); res });
    assert_eq!(find_unanimity_violation(&ascending,&e).unwrap(),Some(UnanimityViolation{ societal_ranking: c(&[0,1]), unanimously_preferred: CandidateIndex(1), society_preferred: CandidateIndex(0) }));
    assert!(!check_unanimity(&ascending,&e).unwrap());
}

#[test]
fn test_unanimity_violation_detected_in_reverse_order() {
    // everyone prefers 0 to 1, but society puts 1 first. This is the pair checked the other way around.
    let e = electorate(&["0>1","0"],2);
    let descending = FnRule::new("descending",|_:&[Ballot],candidates:&[CandidateIndex]|->SocietalRanking { let mut res = candidates.to_vec(); res.sort(); res.reverse(); res });
    let violation = find_unanimity_violation(&descending,&e).unwrap().unwrap();
    assert_eq!(violation.unanimously_preferred,CandidateIndex(0));
    assert_eq!(violation.society_preferred,CandidateIndex(1));
    assert!(violation.to_string().starts_with("Everyone preferred 0 over 1"));
    assert!(!Axiom::Unanimity.check(&e,&descending).unwrap());
}

#[test]
fn test_unanimity_edge_cases() {
    let descending = FnRule::new("descending",|_:&[Ballot],candidates:&[CandidateIndex]|->SocietalRanking { let mut res = candidates.to_vec(); res.sort(); res.reverse(); res });
    // no voters, so no unanimous preferences.
    assert!(check_unanimity(&descending,&electorate(&[],3)).unwrap());
    // a voter indifferent between 0 and 1 means there is no unanimity about them.
    assert!(check_unanimity(&descending,&electorate(&["0>1","2"],3)).unwrap());
    // a winner only rule says nothing about the order of the losers.
    assert!(check_unanimity(&VotingRule::plurality().with_winner_only(),&electorate(&["2>1>0"],3)).unwrap());
}

#[test]
fn test_plurality_tie_breaking_can_fail_unanimity() {
    // everyone prefers 1 to 0, but both get no first preferences and 0 is listed first.
    let e = electorate(&["2>1>0","2>1>0"],3);
    assert_eq!(VotingRule::plurality().evaluate(e.ballots(),&e.all_candidates()).unwrap(),c(&[2,0,1]));
    assert!(!check_unanimity(&VotingRule::plurality(),&e).unwrap());
    assert!(check_unanimity(&VotingRule::borda(BordaWeight::Linear),&e).unwrap());
}

#[test]
fn test_borda_satisfies_unanimity() {
    let mut rng = ChaCha20Rng::seed_from_u64(32);
    for _ in 0..30 {
        let e = Electorate::new(5,NumberOfCandidates(4),&RankingGenerator::Uniform,&mut rng).unwrap();
        for weight in [BordaWeight::Linear,BordaWeight::Tournament,BordaWeight::Dowdall] {
            assert!(check_unanimity(&VotingRule::borda(weight),&e).unwrap());
        }
    }
}

#[test]
fn test_axiom_names() {
    for axiom in [Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true },Axiom::IndependenceOfIrrelevantAlternatives { winner_only: false },Axiom::Unanimity] {
        assert_eq!(axiom.to_string().parse::<Axiom>(),Ok(axiom));
    }
    assert!("Pareto".parse::<Axiom>().is_err());
    let axioms : Vec<Axiom> = serde_json::from_str(r#"["IIA","Unanimity"]"#).unwrap();
    assert_eq!(axioms,vec![Axiom::IndependenceOfIrrelevantAlternatives { winner_only: true },Axiom::Unanimity]);
}
