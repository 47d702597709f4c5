// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use accord_games::hospital_resident::{HospitalResident, HospitalResidentOptimal};
use accord_games::marriage::{MarriageOptimal, StableMarriage};
use accord_games::options::GameOptions;
use accord_games::roommates::StableRoommates;
use accord_games::student_allocation::{AllocationOptimal, StudentAllocation};
use accord_model::capacitated::CapacitatedPlayer;
use accord_model::hierarchy::{Project, Supervisor};
use accord_model::index::{
    HospitalIndex, ProjectIndex, ResidentIndex, ReviewerIndex, RoommateIndex, StudentIndex,
    SuitorIndex, SupervisorIndex,
};
use accord_model::player::Player;
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::hint::black_box;

const SIZES: [usize; 3] = [50, 200, 800];
const SEED: u64 = 0x5EED;

fn shuffled<I: From<usize>>(rng: &mut StdRng, len: usize) -> Vec<I> {
    let mut ranking: Vec<usize> = (0..len).collect();
    ranking.shuffle(rng);
    ranking.into_iter().map(I::from).collect()
}

fn marriage(n: usize) -> StableMarriage {
    let mut rng = StdRng::seed_from_u64(SEED);
    let suitors: Vec<Player<ReviewerIndex>> = (0..n)
        .map(|i| Player::with_preferences(format!("S{}", i), shuffled(&mut rng, n)))
        .collect();
    let reviewers: Vec<Player<SuitorIndex>> = (0..n)
        .map(|i| Player::with_preferences(format!("R{}", i), shuffled(&mut rng, n)))
        .collect();
    StableMarriage::new(&suitors, &reviewers, GameOptions::default())
        .unwrap_or_else(|e| panic!("Failed to build marriage instance: {}", e))
}

fn hospital_resident(n: usize) -> HospitalResident {
    let mut rng = StdRng::seed_from_u64(SEED);
    let hospital_count = (n / 10).max(1);
    let residents: Vec<Player<HospitalIndex>> = (0..n)
        .map(|i| {
            let mut ranking: Vec<HospitalIndex> = shuffled(&mut rng, hospital_count);
            ranking.truncate(hospital_count.min(5));
            Player::with_preferences(format!("R{}", i), ranking)
        })
        .collect();
    let hospitals: Vec<CapacitatedPlayer<ResidentIndex>> = (0..hospital_count)
        .map(|h| {
            let mut ranking: Vec<ResidentIndex> = ResidentIndex::range(n)
                .filter(|r| residents[r.get()].preferences().ranks(HospitalIndex::new(h)))
                .collect();
            ranking.shuffle(&mut rng);
            let capacity = rng.random_range(5..=15);
            CapacitatedPlayer::with_preferences(format!("H{}", h), capacity, ranking)
        })
        .collect();
    HospitalResident::new(&residents, &hospitals, GameOptions::default())
        .unwrap_or_else(|e| panic!("Failed to build hospital-resident instance: {}", e))
}

fn roommates(n: usize) -> StableRoommates {
    let mut rng = StdRng::seed_from_u64(SEED);
    let players: Vec<Player<RoommateIndex>> = (0..n)
        .map(|i| {
            let mut ranking: Vec<RoommateIndex> = shuffled(&mut rng, n);
            ranking.retain(|other| other.get() != i);
            Player::with_preferences(format!("P{}", i), ranking)
        })
        .collect();
    StableRoommates::new(&players, GameOptions::default())
        .unwrap_or_else(|e| panic!("Failed to build roommates instance: {}", e))
}

fn student_allocation(n: usize) -> StudentAllocation {
    let mut rng = StdRng::seed_from_u64(SEED);
    let supervisor_count = (n / 20).max(1);
    let project_count = (n / 5).max(1);
    let owners: Vec<usize> = (0..project_count)
        .map(|p| p % supervisor_count)
        .collect();
    let students: Vec<Player<ProjectIndex>> = (0..n)
        .map(|i| {
            let mut ranking: Vec<ProjectIndex> = shuffled(&mut rng, project_count);
            ranking.truncate(project_count.min(6));
            Player::with_preferences(format!("S{}", i), ranking)
        })
        .collect();
    let projects: Vec<Project> = owners
        .iter()
        .enumerate()
        .map(|(p, &owner)| {
            Project::new(format!("P{}", p), rng.random_range(1..=4), SupervisorIndex::new(owner))
        })
        .collect();
    let supervisors: Vec<Supervisor> = (0..supervisor_count)
        .map(|k| {
            let mut ranking: Vec<StudentIndex> = StudentIndex::range(n)
                .filter(|s| {
                    students[s.get()]
                        .preferences()
                        .working()
                        .iter()
                        .any(|p| owners[p.get()] == k)
                })
                .collect();
            ranking.shuffle(&mut rng);
            Supervisor::with_preferences(format!("F{}", k), rng.random_range(5..=12), ranking)
        })
        .collect();
    StudentAllocation::new(&students, &projects, &supervisors, GameOptions::new().clean(true))
        .unwrap_or_else(|e| panic!("Failed to build student allocation instance: {}", e))
}

fn bench_marriage(c: &mut Criterion) {
    let mut group = c.benchmark_group("stable_marriage");
    for n in SIZES {
        let game = marriage(n);
        group.throughput(Throughput::Elements(n as u64));
        for optimal in [MarriageOptimal::Suitor, MarriageOptimal::Reviewer] {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", optimal), n), &n, |b, _| {
                let mut game = game.clone();
                b.iter(|| {
                    black_box(game.solve(black_box(optimal)).is_ok());
                })
            });
        }
    }
    group.finish();
}

fn bench_hospital_resident(c: &mut Criterion) {
    let mut group = c.benchmark_group("hospital_resident");
    for n in SIZES {
        let game = hospital_resident(n);
        group.throughput(Throughput::Elements(n as u64));
        for optimal in [HospitalResidentOptimal::Resident, HospitalResidentOptimal::Hospital] {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", optimal), n), &n, |b, _| {
                let mut game = game.clone();
                b.iter(|| {
                    black_box(game.solve(black_box(optimal)).is_ok());
                })
            });
        }
    }
    group.finish();
}

fn bench_roommates(c: &mut Criterion) {
    let mut group = c.benchmark_group("stable_roommates");
    for n in SIZES {
        let game = roommates(n);
        group.throughput(Throughput::Elements(n as u64));
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            let mut game = game.clone();
            b.iter(|| {
                black_box(game.solve().is_ok());
            })
        });
    }
    group.finish();
}

fn bench_student_allocation(c: &mut Criterion) {
    let mut group = c.benchmark_group("student_allocation");
    for n in SIZES {
        let game = student_allocation(n);
        group.throughput(Throughput::Elements(n as u64));
        for optimal in [AllocationOptimal::Student, AllocationOptimal::Supervisor] {
            group.bench_with_input(BenchmarkId::new(format!("{:?}", optimal), n), &n, |b, _| {
                let mut game = game.clone();
                b.iter(|| {
                    black_box(game.solve(black_box(optimal)).is_ok());
                })
            });
        }
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_marriage,
    bench_hospital_resident,
    bench_roommates,
    bench_student_allocation
);
criterion_main!(benches);
