//! Plain-text instance format: a header line `p tsp <n>` followed by `n`
//! rows of `n` whitespace-separated costs. `inf` marks an absent edge and
//! lines starting with `c` are comments. Diagonal entries are ignored in
//! favor of the no-self-loop convention.

use crate::graph::{Cost, Instance, NumNodes};
use std::{
    fs::File,
    io::{BufRead, BufReader, ErrorKind},
    path::Path,
};

pub type Result<T> = std::io::Result<T>;

macro_rules! raise_error_unless {
    ($cond : expr, $kind : expr, $info : expr) => {
        if !($cond) {
            return Err(std::io::Error::new($kind, $info));
        }
    };
}

macro_rules! parse_next_value {
    ($iterator : expr, $name : expr) => {{
        let next = $iterator.next();
        raise_error_unless!(
            next.is_some(),
            ErrorKind::InvalidData,
            format!("Premature end of line when parsing {}.", $name)
        );

        let parsed = next.unwrap().parse();
        raise_error_unless!(
            parsed.is_ok(),
            ErrorKind::InvalidData,
            format!("Invalid value found. Cannot parse {}.", $name)
        );

        parsed.unwrap()
    }};
}

pub fn read_instance<R: BufRead>(reader: R) -> Result<Instance> {
    let mut lines = reader.lines().filter(|line| match line {
        Ok(line) => !line.starts_with('c'),
        Err(_) => true,
    });

    let header = lines.next().transpose()?;
    raise_error_unless!(
        header.is_some(),
        ErrorKind::UnexpectedEof,
        "Missing header line."
    );
    let header = header.unwrap();

    let mut tokens = header.split_whitespace();
    raise_error_unless!(
        tokens.next() == Some("p") && tokens.next() == Some("tsp"),
        ErrorKind::InvalidData,
        "Header must start with 'p tsp'."
    );
    let n: NumNodes = parse_next_value!(tokens, "number of cities");

    let mut rows = Vec::with_capacity(n as usize);
    for _ in 0..n {
        let line = lines.next().transpose()?;
        raise_error_unless!(
            line.is_some(),
            ErrorKind::UnexpectedEof,
            format!("Expected {n} cost rows.")
        );
        let line = line.unwrap();

        let mut tokens = line.split_whitespace();
        let mut row = Vec::with_capacity(n as usize);
        for _ in 0..n {
            let cost: Cost = parse_next_value!(tokens, "cost entry");
            row.push(cost);
        }
        rows.push(row);
    }

    Instance::from_rows(rows).map_err(|e| std::io::Error::new(ErrorKind::InvalidData, e))
}

pub fn read_instance_file<P: AsRef<Path>>(path: P) -> Result<Instance> {
    let reader = File::open(path)?;
    read_instance(BufReader::new(reader))
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn parses_costs_comments_and_inf() {
        let input = "c toy instance\np tsp 3\n0 1.5 inf\nc in between\n2 0 3\ninf 4 0\n";
        let instance = read_instance(input.as_bytes()).unwrap();

        assert_eq!(instance.number_of_cities(), 3);
        assert_eq!(instance.cost(0, 1), 1.5);
        assert_eq!(instance.cost(0, 2), Cost::INFINITY);
        assert_eq!(instance.cost(2, 1), 4.0);
        // diagonal is pinned regardless of the written value
        assert_eq!(instance.cost(1, 1), Cost::INFINITY);
    }

    #[test]
    fn rejects_malformed_input() {
        assert!(read_instance("".as_bytes()).is_err());
        assert!(read_instance("p dsp 2\n0 1\n1 0\n".as_bytes()).is_err());
        assert!(read_instance("p tsp 2\n0 1\n".as_bytes()).is_err());
        assert!(read_instance("p tsp 2\n0 x\n1 0\n".as_bytes()).is_err());
        // negative costs are rejected by instance validation
        assert!(read_instance("p tsp 2\n0 -1\n1 0\n".as_bytes()).is_err());
    }
}
