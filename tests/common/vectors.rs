use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde_json::{json, Value};

/// A seeded query embedding of dimension `dims` with values in [-1, 1].
pub fn random_query(dims: usize) -> Vec<f32> {
    let mut rng = StdRng::seed_from_u64(42);
    (0..dims).map(|_| rng.gen_range(-1.0..1.0)).collect()
}

/// A Pinecone-shaped query response with `n` matches in descending score
/// order. Every other match carries metadata.
pub fn match_documents(n: usize) -> Value {
    let matches: Vec<Value> = (0..n)
        .map(|i| {
            let score = 1.0 - (i as f64) * 0.05;
            if i % 2 == 0 {
                json!({
                    "id": format!("doc_{i}"),
                    "score": score,
                    "values": [],
                    "metadata": {"chunk": i, "source": "handbook.pdf"}
                })
            } else {
                json!({"id": format!("doc_{i}"), "score": score, "values": []})
            }
        })
        .collect();
    json!({ "matches": matches, "namespace": "", "usage": {"readUnits": 5} })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_query_is_deterministic() {
        let a = random_query(16);
        let b = random_query(16);
        assert_eq!(a.len(), 16);
        assert_eq!(a, b);
    }

    #[test]
    fn test_match_documents_shape() {
        let doc = match_documents(3);
        let matches = doc["matches"].as_array().unwrap();
        assert_eq!(matches.len(), 3);
        assert!(matches[0].get("metadata").is_some());
        assert!(matches[1].get("metadata").is_none());
    }
}
