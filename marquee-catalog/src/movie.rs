use serde::{Deserialize, Serialize};

/// One film in the programme. Reference data: seeded at load time,
/// never mutated afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    pub price: u32,
    pub genre: String,
    pub duration: String,
    pub rating: String,
}

/// The compiled-in movie programme.
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    pub fn seed() -> Self {
        Self {
            movies: seed_movies(),
        }
    }

    /// Lookup by identifier. An unknown id is a not-found view for the
    /// caller, not an error.
    pub fn movie(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

fn seed_movies() -> Vec<Movie> {
    vec![
        Movie {
            id: "1".to_string(),
            title: "Dune: Part Two".to_string(),
            description: "Paul Atreides unites with Chani and the Fremen while seeking revenge against the conspirators who destroyed his family.".to_string(),
            image: "/movies/dune.jpg".to_string(),
            price: 15,
            genre: "Sci-Fi".to_string(),
            duration: "2h 46m".to_string(),
            rating: "PG-13".to_string(),
        },
        Movie {
            id: "2".to_string(),
            title: "Oppenheimer".to_string(),
            description: "The story of American scientist J. Robert Oppenheimer and his role in the development of the atomic bomb.".to_string(),
            image: "/movies/oppenheimer.jpg".to_string(),
            price: 14,
            genre: "Drama".to_string(),
            duration: "3h 0m".to_string(),
            rating: "R".to_string(),
        },
        Movie {
            id: "3".to_string(),
            title: "The Batman".to_string(),
            description: "When a sadistic serial killer begins murdering key political figures in Gotham, Batman is forced to investigate.".to_string(),
            image: "/movies/batman.jpg".to_string(),
            price: 13,
            genre: "Action".to_string(),
            duration: "2h 56m".to_string(),
            rating: "PG-13".to_string(),
        },
        Movie {
            id: "4".to_string(),
            title: "Avatar: The Way of Water".to_string(),
            description: "Jake Sully lives with his newfound family on Pandora. When a familiar threat returns, Jake must work with Neytiri.".to_string(),
            image: "/movies/avatar.jpg".to_string(),
            price: 16,
            genre: "Sci-Fi".to_string(),
            duration: "3h 12m".to_string(),
            rating: "PG-13".to_string(),
        },
        Movie {
            id: "5".to_string(),
            title: "Top Gun: Maverick".to_string(),
            description: "After thirty years, Maverick is still pushing the envelope as a top naval aviator, but must confront ghosts of his past.".to_string(),
            image: "/movies/topgun.jpg".to_string(),
            price: 14,
            genre: "Action".to_string(),
            duration: "2h 11m".to_string(),
            rating: "PG-13".to_string(),
        },
        Movie {
            id: "6".to_string(),
            title: "Spider-Man: No Way Home".to_string(),
            description: "Peter Parker seeks Doctor Strange's help to make the world forget he is Spider-Man, but the spell goes wrong.".to_string(),
            image: "/movies/spiderman.jpg".to_string(),
            price: 13,
            genre: "Action".to_string(),
            duration: "2h 28m".to_string(),
            rating: "PG-13".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn the_programme_seeds_six_titles() {
        let catalog = Catalog::seed();
        assert_eq!(catalog.len(), 6);
        assert!(!catalog.is_empty());
    }

    #[test]
    fn lookup_by_id() {
        let catalog = Catalog::seed();

        let movie = catalog.movie("1").unwrap();
        assert_eq!(movie.title, "Dune: Part Two");
        assert_eq!(movie.price, 15);

        assert!(catalog.movie("99").is_none());
    }
}
