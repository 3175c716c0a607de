//! # 가중 카드 샘플러
//!
//! 카드 풀에서 "신선한(덜 보여진)" 카드가 더 자주 뽑히도록 중복 없이
//! 표본을 추출하는 순수 함수입니다. DB나 전역 난수에 의존하지 않으므로
//! 시드 고정 RNG로 통계적 성질까지 단위 테스트할 수 있습니다.
//!
//! ## 추첨 방식 (지수 경주)
//! 1. 카드별 가중치 = max(0, policy - times_shown). 0이면 은퇴 → 제외.
//! 2. 카드마다 균등 난수 U ∈ (0, 1]을 뽑아 키 `-ln(U) / weight`를 계산.
//!    이 키는 비율 weight의 지수분포를 따르는 "도착 시각"입니다.
//! 3. 키가 **작은** 순서대로 sample_size장이 당첨됩니다.
//!    가중치가 클수록(덜 보여졌을수록) 일찍 도착할 확률이 높습니다.
//!
//! 수학적으로는 가중치 비례 비복원 추출(Efraimidis-Spirakis)과 동일하며,
//! 신선한 카드가 우선되지만 보장되지는 않습니다 (덜 신선한 카드도 가끔 섞임).

use rand::Rng;

use crate::models::Card;

/// 후보 카드들에서 가중 표본을 뽑습니다.
///
/// ## 매개변수
/// - `cards`: 후보 풀 (호출부가 해시로 미리 필터한 카드들)
/// - `sample_size`: 원하는 표본 크기
/// - `policy`: 수명 정책 — times_shown이 이 값 이상이면 가중치 0으로 제외
/// - `rng`: 난수 생성기 — 프로덕션은 `rand::rng()`, 테스트는 시드 고정 StdRng
///
/// ## 반환값
/// 최대 `sample_size`장. 풀이 작으면 가능한 만큼만, 빈 풀이면 빈 Vec.
/// 한 번의 호출 안에서 같은 카드가 두 번 나오는 일은 없습니다 (비복원).
pub fn weighted_sample<R: Rng>(
    cards: Vec<Card>,
    sample_size: usize,
    policy: i64,
    rng: &mut R,
) -> Vec<Card> {
    // filter_map: 은퇴 카드를 거르면서 동시에 (키, 카드) 쌍으로 변환합니다
    let mut keyed: Vec<(f64, Card)> = cards
        .into_iter()
        .filter_map(|card| {
            let weight = policy - card.times_shown;
            if weight <= 0 {
                return None; // 수명이 다한 카드는 추첨 대상이 아닙니다
            }

            // random::<f64>()는 [0, 1) 구간이므로 1.0에서 빼서 (0, 1]로 만듭니다.
            // ln(0) = -∞를 피하기 위한 구간 보정입니다.
            let u = 1.0 - rng.random::<f64>();
            let key = -u.ln() / weight as f64;
            Some((key, card))
        })
        .collect();

    // total_cmp: NaN까지 전순서로 비교하는 f64 정렬 (여기서 NaN은 나올 수 없지만
    // partial_cmp().unwrap() 같은 패닉 경로를 두지 않습니다)
    keyed.sort_by(|a, b| a.0.total_cmp(&b.0));
    keyed.truncate(sample_size);

    keyed.into_iter().map(|(_, card)| card).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn card(id: &str, times_shown: i64) -> Card {
        Card {
            id: id.to_string(),
            card_data: format!("card {}", id),
            combination_hash: "hash".to_string(),
            combination_name: "combo".to_string(),
            times_shown,
            like_count: 0,
            last_shown_at: None,
            created_at: "2026-01-01T00:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn returns_at_most_sample_size() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards: Vec<Card> = (0..20).map(|i| card(&format!("c{}", i), 0)).collect();

        let sampled = weighted_sample(cards, 10, 5, &mut rng);
        assert_eq!(sampled.len(), 10);
    }

    #[test]
    fn short_pool_returns_all_eligible() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards = vec![card("a", 0), card("b", 1), card("c", 2)];

        let sampled = weighted_sample(cards, 10, 5, &mut rng);
        assert_eq!(sampled.len(), 3);
    }

    #[test]
    fn empty_pool_returns_empty() {
        let mut rng = StdRng::seed_from_u64(7);
        let sampled = weighted_sample(Vec::new(), 10, 5, &mut rng);
        assert!(sampled.is_empty());
    }

    #[test]
    fn retired_cards_are_never_sampled() {
        let mut rng = StdRng::seed_from_u64(7);
        let cards = vec![
            card("fresh", 0),
            card("at-limit", 5),
            card("over-limit", 9),
        ];

        for _ in 0..50 {
            let sampled = weighted_sample(cards.clone(), 3, 5, &mut rng);
            assert_eq!(sampled.len(), 1);
            assert_eq!(sampled[0].id, "fresh");
        }
    }

    #[test]
    fn no_duplicate_ids_in_one_draw() {
        let mut rng = StdRng::seed_from_u64(42);
        let cards: Vec<Card> = (0..15).map(|i| card(&format!("c{}", i), i % 5)).collect();

        let sampled = weighted_sample(cards, 10, 5, &mut rng);
        let mut ids: Vec<&str> = sampled.iter().map(|c| c.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), sampled.len());
    }

    #[test]
    fn fresh_cards_win_more_often() {
        // 가중치 5(한 번도 안 보여짐) vs 가중치 1(네 번 보여짐)의 1장 추첨을
        // 200회 반복하면 기대 승률은 5/6입니다. 시드 고정이라 결과는 결정적이며,
        // 느슨한 하한(60%)만 검증합니다.
        let mut rng = StdRng::seed_from_u64(2024);
        let mut fresh_wins = 0;

        for _ in 0..200 {
            let cards = vec![card("fresh", 0), card("worn", 4)];
            let sampled = weighted_sample(cards, 1, 5, &mut rng);
            if sampled[0].id == "fresh" {
                fresh_wins += 1;
            }
        }

        assert!(
            fresh_wins > 120,
            "expected fresh card to dominate, won {}/200",
            fresh_wins
        );
    }
}
