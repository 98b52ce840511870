//! Consistency rules of the entity store: referential integrity, cascades
//! and the one-verdict-per-coffee invariant.

use barisense::scoring::SensoryWeights;
use barisense::store::models::*;
use barisense::{Error, Store};
use time::macros::date;
use uuid::Uuid;

fn store() -> Store {
    Store::new(SensoryWeights::default())
}

fn coffee_input(name: &str) -> CoffeeInput {
    CoffeeInput {
        name: name.into(),
        roaster: "Test Roastery".into(),
        reference: None,
        format: CoffeeFormat::Grain,
        package_weight_grams: 250,
        price: 14.5,
        purchased_on: date!(2024 - 06 - 10),
    }
}

fn water_input(label: &str, mineralization: f64) -> WaterInput {
    WaterInput {
        label: label.into(),
        source: WaterSource::Bottled,
        brand: Some(label.into()),
        chemistry: WaterChemistry {
            mineralization_ppm: Some(mineralization),
            hardness: Some(mineralization / 3.0),
            alkalinity: Some(mineralization / 2.0),
            ph: Some(7.2),
        },
        filter: None,
    }
}

fn shot_input(coffee_id: Uuid, water_id: Option<Uuid>) -> ShotInput {
    ShotInput {
        coffee_id,
        water_id,
        beverage_type: BeverageType::Espresso,
        grind_setting: "5.5".into(),
        dose_grams: 18.3,
        beverage_weight_grams: 37.8,
        extraction_time_seconds: 29.4,
        notes: None,
    }
}

fn tasting_input(shot_id: Uuid, scores: [i64; 7]) -> TastingInput {
    let s = |v: i64| SensoryInput::Score(v);
    TastingInput {
        shot_id,
        acidity: s(scores[0]),
        bitterness: s(scores[1]),
        body: s(scores[2]),
        aroma: s(scores[3]),
        balance: s(scores[4]),
        finish: s(scores[5]),
        overall: s(scores[6]),
        comments: None,
    }
}

#[test]
fn shot_derives_brew_ratio_and_recomputes_on_update() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let shot = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();
    assert_eq!(shot.brew_ratio, 2.07);

    let mut changed = shot_input(coffee.id, None);
    changed.grind_setting = "6".into();
    changed.notes = Some("unrelated change".into());
    let same_ratio = store.upsert_shot(changed.clone(), Some(shot.id)).unwrap();
    assert_eq!(same_ratio.brew_ratio, 2.07);

    changed.beverage_weight_grams = 45.75;
    let updated = store.upsert_shot(changed, Some(shot.id)).unwrap();
    assert_eq!(updated.id, shot.id);
    assert_eq!(updated.brew_ratio, 2.5);
}

#[test]
fn shot_requires_existing_parents() {
    let mut store = store();
    let missing = Uuid::new_v4();
    assert_eq!(
        store.upsert_shot(shot_input(missing, None), None),
        Err(Error::CoffeeNotFound(missing))
    );

    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let missing_water = Uuid::new_v4();
    assert_eq!(
        store.upsert_shot(shot_input(coffee.id, Some(missing_water)), None),
        Err(Error::WaterNotFound(missing_water))
    );
    assert!(store.list_shots().is_empty());
}

#[test]
fn tasting_requires_existing_shot() {
    let mut store = store();
    let missing = Uuid::new_v4();
    assert_eq!(
        store.upsert_tasting(tasting_input(missing, [3; 7]), None),
        Err(Error::ShotNotFound(missing))
    );
}

#[test]
fn unknown_label_leaves_the_store_untouched() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let shot = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();

    let mut input = tasting_input(shot.id, [3; 7]);
    input.finish = SensoryInput::Label("mystery".into());
    assert_eq!(
        store.upsert_tasting(input, None),
        Err(Error::UnknownLabel("mystery".into()))
    );
    assert!(store.list_tastings().is_empty());
    assert!(store.list_verdicts().is_empty());
}

#[test]
fn tasting_accepts_labels_and_derives_means() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let shot = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();

    let mut input = tasting_input(shot.id, [4, 2, 5, 5, 4, 4, 5]);
    input.acidity = SensoryInput::Label("Prononcé".into());
    input.bitterness = SensoryInput::Label("leger".into());
    let tasting = store.upsert_tasting(input, None).unwrap();

    assert_eq!(tasting.scores.as_array(), [4, 2, 5, 5, 4, 4, 5]);
    assert_eq!(tasting.sensory_mean, 4.14);
    assert_eq!(tasting.weighted_sensory_mean, Some(4.25));
}

#[test]
fn tastings_share_a_single_verdict_per_coffee() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let shot = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();

    store.upsert_tasting(tasting_input(shot.id, [4, 2, 5, 5, 4, 4, 5]), None).unwrap();
    let first = store.verdict_for_coffee(coffee.id).unwrap();
    assert_eq!(first.status, VerdictStatus::NeedsRefinement);

    store.upsert_tasting(tasting_input(shot.id, [5; 7]), None).unwrap();
    let verdicts: Vec<Verdict> = store
        .list_verdicts()
        .into_iter()
        .filter(|v| v.coffee_id == coffee.id)
        .collect();
    assert_eq!(verdicts.len(), 1);
    assert_eq!(verdicts[0].id, first.id);
    assert_eq!(verdicts[0].status, VerdictStatus::BuyAgain);
}

#[test]
fn explicit_verdicts_merge_by_coffee() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let first = store
        .upsert_verdict(
            VerdictInput {
                coffee_id: coffee.id,
                status: VerdictStatus::Avoid,
                rationale: None,
            },
            None,
        )
        .unwrap();
    let merged = store
        .merge_verdict_for_coffee(VerdictInput {
            coffee_id: coffee.id,
            status: VerdictStatus::BuyAgain,
            rationale: Some("great on the second bag".into()),
        })
        .unwrap();
    assert_eq!(merged.id, first.id);
    assert_eq!(store.list_verdicts().len(), 1);
}

#[test]
fn verdict_cannot_move_onto_a_coffee_that_has_one() {
    let mut store = store();
    let a = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let b = store.upsert_coffee(coffee_input("B"), None).unwrap();
    let verdict_a = store
        .merge_verdict_for_coffee(VerdictInput {
            coffee_id: a.id,
            status: VerdictStatus::Avoid,
            rationale: None,
        })
        .unwrap();
    store
        .merge_verdict_for_coffee(VerdictInput {
            coffee_id: b.id,
            status: VerdictStatus::BuyAgain,
            rationale: None,
        })
        .unwrap();

    assert_eq!(
        store.upsert_verdict(
            VerdictInput {
                coffee_id: b.id,
                status: VerdictStatus::Avoid,
                rationale: None,
            },
            Some(verdict_a.id),
        ),
        Err(Error::DuplicateVerdict(b.id))
    );
}

#[test]
fn verdict_for_unknown_coffee_fails() {
    let mut store = store();
    let missing = Uuid::new_v4();
    assert_eq!(
        store.merge_verdict_for_coffee(VerdictInput {
            coffee_id: missing,
            status: VerdictStatus::Avoid,
            rationale: None,
        }),
        Err(Error::CoffeeNotFound(missing))
    );
    let unknown = Uuid::new_v4();
    assert_eq!(store.get_verdict(unknown), Err(Error::VerdictNotFound(unknown)));
    assert_eq!(store.delete_verdict(unknown), Err(Error::VerdictNotFound(unknown)));
}

#[test]
fn deleting_a_coffee_cascades_and_spares_unrelated_records() {
    let mut store = store();
    let water = store.upsert_water(water_input("Soft", 60.0), None).unwrap();
    let doomed = store.upsert_coffee(coffee_input("Doomed"), None).unwrap();
    let kept = store.upsert_coffee(coffee_input("Kept"), None).unwrap();

    let doomed_shots: Vec<Shot> = (0..2)
        .map(|_| store.upsert_shot(shot_input(doomed.id, Some(water.id)), None).unwrap())
        .collect();
    let kept_shot = store.upsert_shot(shot_input(kept.id, Some(water.id)), None).unwrap();
    for shot in &doomed_shots {
        store.upsert_tasting(tasting_input(shot.id, [3; 7]), None).unwrap();
    }
    let kept_tasting = store.upsert_tasting(tasting_input(kept_shot.id, [4; 7]), None).unwrap();

    store.delete_coffee(doomed.id).unwrap();

    assert_eq!(store.get_coffee(doomed.id), Err(Error::CoffeeNotFound(doomed.id)));
    assert!(store.list_shots().iter().all(|s| s.coffee_id != doomed.id));
    assert!(store
        .list_tastings()
        .iter()
        .all(|t| doomed_shots.iter().all(|s| s.id != t.shot_id)));
    assert!(store.verdict_for_coffee(doomed.id).is_none());

    assert_eq!(store.list_shots(), vec![kept_shot]);
    assert_eq!(store.list_tastings(), vec![kept_tasting]);
    assert!(store.verdict_for_coffee(kept.id).is_some());
    assert_eq!(store.list_waters().len(), 1);
}

#[test]
fn deleting_a_shot_removes_its_tastings_only() {
    let mut store = store();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let a = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();
    let b = store.upsert_shot(shot_input(coffee.id, None), None).unwrap();
    store.upsert_tasting(tasting_input(a.id, [3; 7]), None).unwrap();
    store.upsert_tasting(tasting_input(b.id, [3; 7]), None).unwrap();

    store.delete_shot(a.id).unwrap();

    assert_eq!(store.tastings_by_coffee(coffee.id).len(), 1);
    assert_eq!(store.tasting_counts().get(&coffee.id), Some(&1));
    assert!(store.verdict_for_coffee(coffee.id).is_some());
}

#[test]
fn deleting_a_water_is_a_plain_removal() {
    let mut store = store();
    let water = store.upsert_water(water_input("Hard", 200.0), None).unwrap();
    let coffee = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let shot = store.upsert_shot(shot_input(coffee.id, Some(water.id)), None).unwrap();

    store.delete_water(water.id).unwrap();

    assert_eq!(store.get_shot(shot.id).unwrap().water_id, Some(water.id));
    assert_eq!(store.get_water(water.id), Err(Error::WaterNotFound(water.id)));
}

#[test]
fn tasting_counts_report_zero_for_untasted_coffees() {
    let mut store = store();
    let tasted = store.upsert_coffee(coffee_input("Tasted"), None).unwrap();
    let untasted = store.upsert_coffee(coffee_input("Untasted"), None).unwrap();
    let shot = store.upsert_shot(shot_input(tasted.id, None), None).unwrap();
    store.upsert_tasting(tasting_input(shot.id, [3; 7]), None).unwrap();
    store.upsert_tasting(tasting_input(shot.id, [4; 7]), None).unwrap();

    let counts = store.tasting_counts();
    assert_eq!(counts.get(&tasted.id), Some(&2));
    assert_eq!(counts.get(&untasted.id), Some(&0));
}

#[test]
fn verdicts_are_listed_newest_first() {
    let mut store = store();
    let a = store.upsert_coffee(coffee_input("A"), None).unwrap();
    let b = store.upsert_coffee(coffee_input("B"), None).unwrap();
    for coffee_id in [a.id, b.id] {
        store
            .merge_verdict_for_coffee(VerdictInput {
                coffee_id,
                status: VerdictStatus::UnderObservation,
                rationale: None,
            })
            .unwrap();
    }

    let listed: Vec<Uuid> = store.list_verdicts().iter().map(|v| v.coffee_id).collect();
    assert_eq!(listed, vec![b.id, a.id]);
}
