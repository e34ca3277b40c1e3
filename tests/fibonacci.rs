use {
    ::std::fmt,
    ::threaded_gen::{
        prelude::*,
        Builder,
    },
};

const FIRST_NINE: [u64; 9] = [0, 1, 1, 2, 3, 5, 8, 13, 21];
const BELOW_100: [u64; 12] = [0, 1, 1, 2, 3, 5, 8, 13, 21, 34, 55, 89];

#[derive(Debug, PartialEq, Eq)]
struct TooBig(u64);

impl fmt::Display for TooBig {
    fn fmt (self: &'_ Self, f: &'_ mut fmt::Formatter<'_>)
      -> fmt::Result
    {
        write!(f, "{} is too big", self.0)
    }
}

impl ::std::error::Error for TooBig {}

struct Fibonacci;

impl Producer for Fibonacci {
    type Item = u64;

    fn run (self: Self, co: &'_ Yielder<u64>)
      -> Result<(), BoxError>
    {
        co.yield_(0)?;
        let (mut i, mut j) = (0, 1);
        loop {
            co.yield_(j)?;
            let next = i + j;
            i = j;
            j = next;
        }
    }
}

struct BreakingFibonacci {
    limit: u64,
}

impl Producer for BreakingFibonacci {
    type Item = u64;

    fn run (self: Self, co: &'_ Yielder<u64>)
      -> Result<(), BoxError>
    {
        co.yield_(0)?;
        let (mut i, mut j) = (0, 1);
        loop {
            if j > self.limit {
                return Err(TooBig(j).into());
            }
            co.yield_(j)?;
            let next = i + j;
            i = j;
            j = next;
        }
    }
}

/// Pulls until the generator fails, and returns what it yielded before.
fn drain_until_failure (generator: &'_ mut Generator<u64>)
  -> (Vec<u64>, GeneratorError)
{
    let mut seen = vec![];
    loop {
        match generator.pull() {
            | Ok(value) => seen.push(value),
            | Err(err) => return (seen, err),
        }
    }
}

#[test]
fn producer_first_nine ()
{
    let mut fibonacci = Fibonacci.into_generator();
    let first: Vec<u64> = (0 .. 9).map(|_| fibonacci.pull().unwrap()).collect();
    assert_eq!(first, FIRST_NINE);
}

#[test]
fn closure_first_nine ()
{
    let fibonacci = Generator::new(|co| Fibonacci.run(co));
    let first: Vec<u64> = fibonacci.take(9).map(Result::unwrap).collect();
    assert_eq!(first, FIRST_NINE);
}

#[test]
fn implicit_first_nine ()
{
    let fibonacci = Builder::new().name("implicit fibonacci").build_implicit(|| {
        yield_!(0_u64);
        let (mut i, mut j) = (0_u64, 1);
        loop {
            yield_!(j);
            let next = i + j;
            i = j;
            j = next;
        }
    });
    let first: Vec<u64> = fibonacci.take(9).map(Result::unwrap).collect();
    assert_eq!(first, FIRST_NINE);
}

#[test]
fn breaking_producer ()
{
    let mut fibonacci = BreakingFibonacci { limit: 100 }.into_generator();
    let (seen, err) = drain_until_failure(&mut fibonacci);
    assert_eq!(seen, BELOW_100);
    assert_eq!(err.downcast_cause::<TooBig>(), Some(&TooBig(144)));
    assert!(matches!(fibonacci.pull(), Err(GeneratorError::Terminated)));
}

#[test]
fn breaking_implicit ()
{
    let mut fibonacci = registry::build(|| {
        yield_!(0_u64);
        let (mut i, mut j) = (0_u64, 1);
        loop {
            if j > 100 {
                return Err(TooBig(j).into());
            }
            yield_!(j);
            let next = i + j;
            i = j;
            j = next;
        }
    });
    let (seen, err) = drain_until_failure(&mut fibonacci);
    assert_eq!(seen, BELOW_100);
    assert_eq!(err.downcast_cause::<TooBig>(), Some(&TooBig(144)));
    assert!(matches!(fibonacci.pull(), Err(GeneratorError::Terminated)));
}

#[test]
fn two_passes_continue ()
{
    let mut fibonacci = Fibonacci.into_generator();
    let first: Vec<u64> = fibonacci.iter().take(4).map(Result::unwrap).collect();
    let second: Vec<u64> = fibonacci.iter().take(5).map(Result::unwrap).collect();
    assert_eq!(first, FIRST_NINE[.. 4]);
    assert_eq!(second, FIRST_NINE[4 ..]);
}

#[test]
fn interleaved ()
{
    let mut plain = Fibonacci.into_generator();
    let mut breaking = BreakingFibonacci { limit: 100 }.into_generator();
    let mut implicit = registry::build::<u64, _>(|| {
        for n in 0_u64 .. {
            yield_!(n);
        }
        Ok(())
    });

    let mut from_plain = vec![];
    let mut from_breaking = vec![];
    let mut from_implicit = vec![];
    loop {
        from_plain.push(plain.pull().unwrap());
        from_implicit.push(implicit.pull().unwrap());
        match breaking.pull() {
            | Ok(value) => from_breaking.push(value),
            | Err(err) => {
                assert!(err.downcast_cause::<TooBig>().is_some());
                break;
            },
        }
    }
    assert_eq!(from_breaking, BELOW_100);
    assert_eq!(from_plain[.. 12], BELOW_100);
    assert_eq!(from_plain.len(), 13);
    assert_eq!(from_implicit, Vec::from_iter(0 .. 13));
}
