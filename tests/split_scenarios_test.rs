use bill_split::domain::model::{Bill, Item, Participant};
use bill_split::SplitCalculator;
use chrono::Utc;

fn participant(id: &str, name: &str) -> Participant {
    Participant {
        id: id.to_string(),
        name: name.to_string(),
        email: None,
    }
}

fn item(id: &str, price: f64, consumers: &[&str]) -> Item {
    Item {
        id: id.to_string(),
        name: id.to_string(),
        price,
        consumed_by: consumers.iter().map(|c| c.to_string()).collect(),
    }
}

fn bill(items: Vec<Item>, participants: Vec<Participant>, tip: f64) -> Bill {
    Bill {
        id: "bill_scenario".to_string(),
        title: "Scenario".to_string(),
        description: None,
        items,
        participants,
        tip,
        currency: "RUB".to_string(),
        created_at: Utc::now(),
        created_by: "Anonymous".to_string(),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[test]
fn test_single_item_single_participant_with_tip() {
    let summary = SplitCalculator::compute(&bill(
        vec![item("steak", 100.0, &["p1"])],
        vec![participant("p1", "Anna")],
        10.0,
    ));

    assert_eq!(summary.subtotal, 100.0);
    assert_eq!(summary.tip_amount, 10.0);
    assert_eq!(summary.grand_total, 110.0);
    assert_eq!(summary.split[0].total, 110.0);
}

#[test]
fn test_item_shared_equally_by_two() {
    let summary = SplitCalculator::compute(&bill(
        vec![item("platter", 90.0, &["p1", "p2"])],
        vec![participant("p1", "Anna"), participant("p2", "Boris")],
        10.0,
    ));

    assert_eq!(summary.tip_amount, 9.0);
    for split in &summary.split {
        assert_eq!(split.subtotal, 45.0);
        assert_eq!(split.tip_share, 4.5);
        assert_eq!(split.total, 49.5);
    }

    let summed: f64 = summary.split.iter().map(|s| s.total).sum();
    assert_eq!(summed, 99.0);
    assert_eq!(summary.grand_total, 99.0);
}

#[test]
fn test_item_without_consumers_stays_unallocated() {
    let summary = SplitCalculator::compute(&bill(
        vec![item("a", 60.0, &["p1"]), item("b", 40.0, &[])],
        vec![participant("p1", "Anna")],
        0.0,
    ));

    assert_eq!(summary.subtotal, 100.0);
    assert_eq!(summary.split[0].subtotal, 60.0);
    assert_eq!(summary.split[0].total, 60.0);

    let allocated: f64 = summary.split.iter().map(|s| s.subtotal).sum();
    assert!((summary.subtotal - allocated - 40.0).abs() < 0.005);
}

#[test]
fn test_unequal_overlap_tip_is_proportional() {
    let summary = SplitCalculator::compute(&bill(
        vec![item("item1", 50.0, &["p1"]), item("item2", 50.0, &["p1", "p2"])],
        vec![participant("p1", "Anna"), participant("p2", "Boris")],
        20.0,
    ));

    assert_eq!(summary.tip_amount, 20.0);
    assert_eq!(summary.split[0].subtotal, 75.0);
    assert_eq!(summary.split[0].tip_share, 15.0);
    assert_eq!(summary.split[0].total, 90.0);
    assert_eq!(summary.split[1].subtotal, 25.0);
    assert_eq!(summary.split[1].tip_share, 5.0);
    assert_eq!(summary.split[1].total, 30.0);
    assert_eq!(summary.grand_total, 120.0);
}

#[test]
fn test_zero_tip_gives_zero_tip_shares() {
    let summary = SplitCalculator::compute(&bill(
        vec![
            item("soup", 7.35, &["p1", "p2", "p3"]),
            item("bread", 2.10, &["p2"]),
            item("wine", 31.99, &["p1", "p3"]),
        ],
        vec![
            participant("p1", "Anna"),
            participant("p2", "Boris"),
            participant("p3", "Vera"),
        ],
        0.0,
    ));

    assert_eq!(summary.tip_amount, 0.0);
    assert!(summary.split.iter().all(|s| s.tip_share == 0.0));
}

#[test]
fn test_single_consumer_total_equals_price_without_tip() {
    let summary = SplitCalculator::compute(&bill(
        vec![
            item("coffee", 3.456, &["p2"]),
            item("cake", 12.0, &["p1", "p3"]),
            item("water", 1.0, &[]),
        ],
        vec![
            participant("p1", "Anna"),
            participant("p2", "Boris"),
            participant("p3", "Vera"),
        ],
        0.0,
    ));

    assert_eq!(summary.split[1].total, 3.46);
}

#[test]
fn test_grand_total_is_rounded_sum_of_parts() {
    let bills = vec![
        bill(vec![item("x", 33.33, &["p1"])], vec![participant("p1", "A")], 12.5),
        bill(vec![item("x", 0.01, &["p1"])], vec![participant("p1", "A")], 50.0),
        bill(
            vec![item("x", 19.99, &["p1", "p2"]), item("y", 7.77, &[])],
            vec![participant("p1", "A"), participant("p2", "B")],
            17.0,
        ),
    ];

    for b in &bills {
        let subtotal: f64 = b.items.iter().map(|i| i.price).sum();
        let tip_amount = subtotal * (b.tip / 100.0);
        let summary = SplitCalculator::compute(b);

        assert_eq!(summary.grand_total, round2(subtotal + tip_amount));
    }
}

#[test]
fn test_empty_bill_summary_is_valid() {
    let summary = SplitCalculator::compute(&bill(
        vec![],
        vec![participant("p1", "Anna"), participant("p2", "Boris")],
        10.0,
    ));

    assert_eq!(summary.subtotal, 0.0);
    assert_eq!(summary.tip_amount, 0.0);
    assert_eq!(summary.grand_total, 0.0);
    for split in &summary.split {
        assert_eq!(split.subtotal, 0.0);
        assert_eq!(split.tip_share, 0.0);
        assert_eq!(split.total, 0.0);
    }
}

#[test]
fn test_items_with_only_dangling_consumers_allocate_nothing() {
    let summary = SplitCalculator::compute(&bill(
        vec![item("x", 25.0, &["ghost"])],
        vec![participant("p1", "Anna")],
        10.0,
    ));

    assert_eq!(summary.grand_total, 27.5);
    assert_eq!(summary.split[0].subtotal, 0.0);
    assert_eq!(summary.split[0].tip_share, 0.0);
}
