use chrono::{DateTime, NaiveDate, Utc};
use git2::{Repository, Sort};
use std::path::Path;

/// Collect the UTC committer dates of HEAD's history back to `since`.
///
/// Commits are walked newest first by commit time and the walk stops at the
/// first commit older than `since`. When `author` is given only commits whose
/// author name matches exactly are kept. A repository without commits yields
/// an empty list.
pub fn collect_commit_dates(
    path: &Path,
    author: Option<&str>,
    since: NaiveDate,
) -> Result<Vec<NaiveDate>, git2::Error> {
    let repo = Repository::open(path)?;
    if repo.is_empty()? {
        log::debug!("{} has no commits yet", path.display());
        return Ok(Vec::new());
    }

    let mut revwalk = repo.revwalk()?;
    revwalk.push_head()?;
    revwalk.set_sorting(Sort::TIME)?;

    let mut dates = Vec::new();
    for oid in revwalk {
        let commit = repo.find_commit(oid?)?;

        let Some(date) =
            DateTime::<Utc>::from_timestamp(commit.time().seconds(), 0).map(|dt| dt.date_naive())
        else {
            continue;
        };
        if date < since {
            break;
        }

        if let Some(author) = author {
            if commit.author().name() != Some(author) {
                continue;
            }
        }
        dates.push(date);
    }

    log::debug!(
        "Collected {} commits since {} from {}",
        dates.len(),
        since,
        path.display()
    );
    Ok(dates)
}
