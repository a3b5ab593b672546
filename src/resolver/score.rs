use crate::domain::{candidate::Candidate, track::Track};

/// Case-insensitive similarity of two strings, 0 (nothing alike) to 100 (equal).
///
/// Indel ratio, `2 * matching chars / total length`.
pub fn similarity(a: &str, b: &str) -> u8 {
    let (a, b) = (a.to_lowercase(), b.to_lowercase());
    let ratio = rapidfuzz::fuzz::ratio(a.chars(), b.chars());
    (ratio * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Mean similarity over the fields the track actually has.
///
/// The title is always compared. Album and artist only count when the track
/// knows them; a missing field is left out of the mean, not scored as zero.
/// For the artist, the best matching candidate artist is used.
pub fn score(track: &Track, candidate: &Candidate) -> f64 {
    let name = Some(similarity(&candidate.name, &track.title));

    let album = track
        .album
        .as_deref()
        .map(|album| similarity(&candidate.album_name, album));

    let artist = track.artist.as_deref().and_then(|artist| {
        candidate
            .artists
            .iter()
            .map(|a| similarity(&a.name, artist))
            .max()
    });

    let present = [name, album, artist]
        .into_iter()
        .flatten()
        .map(f64::from)
        .collect::<Vec<_>>();

    present.iter().sum::<f64>() / present.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candidate::CandidateArtist;

    fn candidate(name: &str, album: &str, artists: &[&str]) -> Candidate {
        Candidate {
            id: "id".to_string(),
            name: name.to_string(),
            album_name: album.to_string(),
            artists: artists
                .iter()
                .map(|name| CandidateArtist {
                    name: name.to_string(),
                })
                .collect(),
        }
    }

    #[test]
    fn test_similarity_ignores_case() {
        assert_eq!(similarity("ABC", "abc"), similarity("abc", "abc"));
        assert_eq!(similarity("ABC", "abc"), 100);
    }

    #[test]
    fn test_similarity_range() {
        assert_eq!(similarity("abc", "xyz"), 0);
        let partial = similarity("Psychosocial", "Psychosocial.");
        assert!(partial > 90 && partial < 100);
    }

    #[test]
    fn test_similarity_near_threshold() {
        assert_eq!(similarity("Sonne.", "Sonne"), 91);
        assert_eq!(similarity("Psychosocial!!", "Psychosocial"), 92);
        assert_eq!(similarity("Psychosocial.", "Psychosocial"), 96);
    }

    #[test]
    fn test_one_extra_character_still_qualifies() {
        let track = Track::new("Sonne");
        let candidate = candidate("Sonne.", "Mutter", &["Rammstein"]);

        assert_eq!(score(&track, &candidate), 91.0);
        assert!(score(&track, &candidate) >= 90.0);
    }

    #[test]
    fn test_title_only_track_scores_by_name() {
        let track = Track::new("Du Hast");
        let candidate = candidate("Du Hast", "Something Else", &["Someone Else"]);

        assert_eq!(score(&track, &candidate), 100.0);
    }

    #[test]
    fn test_title_only_score_equals_name_similarity() {
        let track = Track::new("Psychosocial");
        let candidate = candidate("Psychosocial.", "", &[]);

        assert_eq!(
            score(&track, &candidate),
            f64::from(similarity("Psychosocial.", "Psychosocial"))
        );
    }

    #[test]
    fn test_album_is_averaged_in_when_known() {
        let track = Track::new("Du Hast").with_album("Sehnsucht");
        let candidate = candidate("Du Hast", "Mutter", &[]);

        let expected = (100.0 + f64::from(similarity("Mutter", "Sehnsucht"))) / 2.0;
        assert_eq!(score(&track, &candidate), expected);
        assert!(score(&track, &candidate) < 100.0);
    }

    #[test]
    fn test_best_matching_artist_counts() {
        let track = Track::new("Du Hast").with_artist("Rammstein");
        let candidate = candidate("Du Hast", "Sehnsucht", &["Apache 207", "Rammstein"]);

        assert_eq!(score(&track, &candidate), 100.0);
    }

    #[test]
    fn test_candidate_without_artists_skips_artist_term() {
        let track = Track::new("Du Hast").with_artist("Rammstein");
        let candidate = candidate("Du Hast", "Sehnsucht", &[]);

        assert_eq!(score(&track, &candidate), 100.0);
    }

    #[test]
    fn test_all_fields_averaged() {
        let track = Track::new("Du Hast")
            .with_album("Sehnsucht")
            .with_artist("Rammstein");
        let candidate = candidate("Du Hast", "Sehnsucht", &["Lindemann"]);

        let expected = (100.0 + 100.0 + f64::from(similarity("Lindemann", "Rammstein"))) / 3.0;
        assert_eq!(score(&track, &candidate), expected);
    }
}
