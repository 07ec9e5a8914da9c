//! Display order for pricing cards.
//!
//! The single popular plan is placed in the middle of the other plans so the
//! emphasized card renders centered:
//!
//! ```text
//! others[..mid] ++ [popular] ++ others[mid..]    where mid = others.len() / 2
//! ```
//!
//! When there is no popular plan, fewer than two other plans, or more than
//! one popular plan, nothing is spliced: plans come back with the
//! non-popular ones first (by `order_index`) followed by the popular ones.

/// The two attributes the ordering rule looks at.
pub trait RankedPlan {
    fn is_popular(&self) -> bool;
    fn order_index(&self) -> i32;
}

/// Minimum number of non-popular plans required before splicing.
pub const MIN_OTHERS_FOR_SPLICE: usize = 2;

/// Produce the display sequence for a set of pricing plans.
pub fn display_order<P: RankedPlan + Clone>(plans: &[P]) -> Vec<P> {
    let (mut popular, mut others): (Vec<P>, Vec<P>) =
        plans.iter().cloned().partition(|p| p.is_popular());
    others.sort_by_key(|p| p.order_index());
    popular.sort_by_key(|p| p.order_index());

    if popular.len() != 1 || others.len() < MIN_OTHERS_FOR_SPLICE {
        others.extend(popular);
        return others;
    }

    let mid = others.len() / 2;
    let tail = others.split_off(mid);
    others.extend(popular);
    others.extend(tail);
    others
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Plan {
        name: &'static str,
        popular: bool,
        idx: i32,
    }

    impl RankedPlan for Plan {
        fn is_popular(&self) -> bool {
            self.popular
        }
        fn order_index(&self) -> i32 {
            self.idx
        }
    }

    fn plan(name: &'static str, idx: i32) -> Plan {
        Plan {
            name,
            popular: false,
            idx,
        }
    }

    fn popular(name: &'static str, idx: i32) -> Plan {
        Plan {
            name,
            popular: true,
            idx,
        }
    }

    fn names(plans: &[Plan]) -> Vec<&'static str> {
        plans.iter().map(|p| p.name).collect()
    }

    #[test]
    fn popular_goes_after_first_of_three() {
        let plans = vec![plan("C", 3), popular("P", 4), plan("A", 1), plan("B", 2)];
        assert_eq!(names(&display_order(&plans)), vec!["A", "P", "B", "C"]);
    }

    #[test]
    fn popular_splits_two_others() {
        let plans = vec![plan("plan1", 1), plan("plan2", 2), popular("new", 3)];
        assert_eq!(
            names(&display_order(&plans)),
            vec!["plan1", "new", "plan2"]
        );
    }

    #[test]
    fn popular_centered_among_four() {
        let plans = vec![
            popular("P", 0),
            plan("A", 1),
            plan("B", 2),
            plan("C", 3),
            plan("D", 4),
        ];
        assert_eq!(
            names(&display_order(&plans)),
            vec!["A", "B", "P", "C", "D"]
        );
    }

    #[test]
    fn single_other_is_not_spliced() {
        let plans = vec![popular("P", 1), plan("A", 2)];
        assert_eq!(names(&display_order(&plans)), vec!["A", "P"]);
    }

    #[test]
    fn no_popular_sorts_by_index() {
        let plans = vec![plan("B", 2), plan("C", 3), plan("A", 1)];
        assert_eq!(names(&display_order(&plans)), vec!["A", "B", "C"]);
    }

    #[test]
    fn several_popular_plans_are_all_kept() {
        let plans = vec![
            popular("P1", 1),
            plan("A", 2),
            popular("P2", 3),
            plan("B", 4),
        ];
        assert_eq!(
            names(&display_order(&plans)),
            vec!["A", "B", "P1", "P2"]
        );
    }

    #[test]
    fn empty_input() {
        assert!(display_order::<Plan>(&[]).is_empty());
    }
}
