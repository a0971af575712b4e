use std::convert::TryFrom;
use std::io::BufRead;

/// Raw input for [`GraphBuilder::build`](crate::preprocessing::GraphBuilder::build),
/// as read from a DIMACS-style edge list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    pub node_count: usize,
    pub edges: Vec<(usize, usize)>,
}

fn nums_error(res: &[Result<usize, std::num::ParseIntError>]) -> bool {
    res.len() != 2 || res[0].is_err() || res[1].is_err()
}

fn invalid_line(line: &str) -> std::io::Error {
    std::io::Error::new(
        std::io::ErrorKind::InvalidInput,
        format!("invalid line: {}", line),
    )
}

/// `p <format> <nodes> <edges>` header line.
fn header_line(line: &str) -> Result<(usize, usize), std::io::Error> {
    let nums: Vec<Result<usize, std::num::ParseIntError>> = line
        .trim_start_matches('p')
        .trim()
        .split(' ')
        .skip(1)
        .map(|s| s.parse())
        .collect();
    if nums_error(&nums) {
        return Err(invalid_line(line));
    }
    let n = nums[0].as_ref().unwrap();
    let m = nums[1].as_ref().unwrap();
    Ok((*n, *m))
}

/// `<u> <v>` edge line, 1-based.
fn edge_line(line: &str) -> Result<(usize, usize), std::io::Error> {
    let nums: Vec<Result<usize, std::num::ParseIntError>> =
        line.trim().split(' ').map(|s| s.parse()).collect();
    if nums_error(&nums) {
        return Err(invalid_line(line));
    }
    let u = nums[0].as_ref().unwrap();
    let v = nums[1].as_ref().unwrap();
    if *u == 0 || *v == 0 {
        return Err(invalid_line(line));
    }
    Ok((u - 1, v - 1))
}

pub struct EdgeListRead<T: BufRead>(pub T);

impl<T: BufRead> TryFrom<EdgeListRead<T>> for EdgeList {
    type Error = std::io::Error;

    fn try_from(reader: EdgeListRead<T>) -> Result<Self, Self::Error> {
        let mut node_count = None;
        let mut edges = Vec::new();
        for line in reader.0.lines() {
            let line = line?;
            match line.chars().next() {
                None => {}
                Some('c') => {}
                Some('p') => {
                    let (n, m) = header_line(line.as_str())?;
                    node_count = Some(n);
                    edges.reserve(m);
                }
                _ => {
                    edges.push(edge_line(line.as_str())?);
                }
            }
        }
        match node_count {
            Some(node_count) => Ok(EdgeList { node_count, edges }),
            None => Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                "missing problem header",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{EdgeList, EdgeListRead};
    use std::convert::TryFrom;

    #[test]
    fn parses_headers_comments_and_edges() {
        let text = "c a triangle\np vc 3 3\n1 2\n2 3\n1 3\n";
        let parsed = EdgeList::try_from(EdgeListRead(text.as_bytes())).unwrap();
        assert_eq!(parsed.node_count, 3);
        assert_eq!(parsed.edges, vec![(0, 1), (1, 2), (0, 2)]);
    }

    #[test]
    fn rejects_malformed_edge_lines() {
        let text = "p vc 2 1\n1 x\n";
        assert!(EdgeList::try_from(EdgeListRead(text.as_bytes())).is_err());
    }

    #[test]
    fn rejects_input_without_header() {
        let text = "1 2\n";
        assert!(EdgeList::try_from(EdgeListRead(text.as_bytes())).is_err());
    }
}
