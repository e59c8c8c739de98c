/*!

This is the long-form manual for `topsis_core` and the `topsis` command line program.

## Running

```bash
topsis data.csv "1,1,1,2" "+,+,-,+"
```

The three positional arguments are the input table, the weights and the
impacts. Weights and impacts are comma-separated, one per criterion. Spaces
around the commas are ignored.

The result is written to `output-result.csv` unless `--out` is given
(`--out stdout` prints the CSV instead). A summary table is printed at the
end of the run (disable it with `--quiet`). It is left out when the CSV is
printed to stdout.

## Input formats

The first row of the table is the header. The first column contains the
names of the alternatives, every other column is a criterion and must only
contain numbers.

|  Model | Price | Storage | Camera | Looks |
|--------|-------|---------|--------|-------|
| M1     | 250   | 16      | 12     | 5     |
| M2     | 200   | 16      | 8      | 3     |
| ...    |       |         |        |       |

The following formats are supported (`--input-type`):
* `csv` Comma Separated Values (default)
* `xlsx` Excel spreadsheet. The first worksheet is used unless
  `--excel-worksheet-name` is given.

## Output

The output is the input table with two more columns:

* `Topsis Score` the closeness score, between 0 and 1
* `Rank` the rank of the alternative, 1 being the best

All the original cells are copied unchanged.

## Configuration

All the options may also be written in a JSON file passed with `--config`.
Values given on the command line take precedence.

```json
{
  "input": { "provider": "csv", "filePath": "data.csv" },
  "weights": "1,1,1,2",
  "impacts": "+,+,-,+",
  "zeroColumnPolicy": "reject",
  "output": { "filePath": "result.csv", "printResults": true }
}
```

Relative paths are resolved from the directory of the configuration file.

## Conventions

**Ties.** Alternatives with exactly the same score share the same rank. The
next score gets the next rank, without gaps: the scores `0.9, 0.7, 0.7, 0.2`
are ranked `1, 2, 2, 3`.

**Identical alternatives.** If an alternative is at distance zero from both
the ideal-best and the ideal-worst points (which only happens when all the
alternatives have the same weighted values), its score is defined as `0.5`.

**Columns of zeros.** A criterion whose values are all zero cannot be
normalized. By default this is an error (`DegenerateColumn`). With the
`zero-fill` policy (`--zero-column-policy zero-fill` or
`"zeroColumnPolicy": "zeroFill"`), the column is kept with normalized
values of zero and has no effect on the ranking.

**Weights** must be positive numbers. They do not need to sum to 1:
multiplying all the weights by the same number does not change the result.

## Errors

The checks are run in this order and the first failure is reported:

1. the input file exists and can be read
2. the table has at least three columns
3. every criterion value is a number, and there is at least one row
4. the weights are numbers, as many as the criteria, all positive
5. the impacts are as many as the criteria, and each is `+` or `-`

The program exits with status 1 on any error.

*/
